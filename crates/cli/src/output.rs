//! Terminal formatting

use colored::Colorize;
use homestretch_sections::Section;
use uuid::Uuid;

/// First block of a uuid, enough to address a section on the command line
pub fn short_id(id: &Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

/// One numbered row of the section list
pub fn section_line(position: usize, section: &Section) -> String {
    let status = if section.enabled {
        "on ".green()
    } else {
        "off".dimmed()
    };
    format!(
        "{:>3}. {} {} {} {}",
        position,
        status,
        format!("{:<28}", section.name).bold(),
        format!("{:<20}", section.component()).cyan(),
        short_id(&section.id).dimmed(),
    )
}

pub fn section_table(sections: &[Section]) -> String {
    if sections.is_empty() {
        return "No sections".dimmed().to_string();
    }
    sections
        .iter()
        .enumerate()
        .map(|(i, section)| section_line(i + 1, section))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn success(message: impl AsRef<str>) -> String {
    format!("{} {}", "✓".green().bold(), message.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use homestretch_sections::SectionKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_short_id() {
        let id = Uuid::from_u128(0x1234_5678_9abc_def0_1234_5678_9abc_def0);
        assert_eq!(short_id(&id), "12345678");
    }

    #[test]
    fn test_table_rows() {
        colored::control::set_override(false);
        let hero = Section::new("Hero", SectionKind::Hero, 1.into());
        let news = Section::new("News", SectionKind::News, 2.into()).enabled(false);

        let table = section_table(&[hero.clone(), news]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  1. on  Hero"));
        assert!(lines[0].contains("HeroSection"));
        assert!(lines[0].ends_with(&short_id(&hero.id)));
        assert!(lines[1].starts_with("  2. off News"));
    }

    #[test]
    fn test_empty_table() {
        colored::control::set_override(false);
        assert_eq!(section_table(&[]), "No sections");
    }
}
