//! Command implementations
//!
//! Reads go straight through `SectionClient`; anything that changes a
//! section loads a `SectionEditor` first and goes through its operations,
//! so the CLI applies the same local validation and single-call reorder as
//! any other editor front end.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use homestretch_core::{HomepageId, MAIN_HOMEPAGE, SectionId};
use homestretch_editor::{
    EditorError, ImageFile, SectionApi, SectionClient, SectionEditor, TokenStore,
};
use homestretch_render::{HomepageRenderer, RenderMode};
use homestretch_sections::{ImageSlot, Section, SectionData, SectionKind};
use serde_json::Value;

use crate::args::{Cli, Command};
use crate::config::CliConfig;
use crate::output;

// ============================================================================
// Entry point
// ============================================================================

pub async fn run(cli: Cli) -> Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?.with_api_url(cli.api_url);
    let tokens = match cli.token_file {
        Some(path) => TokenStore::new(path),
        None => TokenStore::default_location()?,
    };
    let session = Session {
        config,
        tokens,
        homepage: cli.homepage.unwrap_or(MAIN_HOMEPAGE),
    };
    tracing::debug!(api_url = %session.config.api_url, command = ?cli.command, "running command");

    match cli.command {
        Command::Login { token } => session.login(token),
        Command::Logout => session.logout(),
        Command::List { section_type } => session.list(section_type).await,
        Command::Show { id } => session.show(&id).await,
        Command::Add {
            component,
            name,
            disabled,
        } => session.add(&component, name, !disabled).await,
        Command::Toggle { id } => session.toggle(&id).await,
        Command::Move { id, position } => session.move_to(&id, position).await,
        Command::Edit { id, set, data_file } => session.edit(&id, &set, data_file.as_deref()).await,
        Command::Rename { id, name } => session.rename(&id, name).await,
        Command::Remove { id } => session.remove(&id).await,
        Command::Upload { id, slot, file } => session.upload(&id, slot.into(), file).await,
        Command::Render { preview, output } => session.render(preview, output).await,
    }
}

struct Session {
    config: CliConfig,
    tokens: TokenStore,
    homepage: HomepageId,
}

impl Session {
    // ========================================================================
    // Plumbing
    // ========================================================================

    fn client(&self) -> Result<SectionClient> {
        SectionClient::with_timeout(&self.config.api_url, self.config.timeout())
            .context("failed to build HTTP client")
    }

    fn admin_client(&self) -> Result<SectionClient> {
        let token = self
            .tokens
            .load()?
            .ok_or_else(|| anyhow!("Not logged in. Run `homestretch login` first."))?;
        Ok(self.client()?.with_token(token))
    }

    async fn editor(&self) -> Result<SectionEditor<SectionClient>> {
        let mut editor = SectionEditor::for_homepage(self.admin_client()?, self.homepage);
        editor.load().await.map_err(explain)?;
        Ok(editor)
    }

    async fn sections(&self) -> Result<Vec<Section>> {
        self.client()?
            .list_sections(Some(self.homepage))
            .await
            .map_err(|e| anyhow!(e.user_message()))
    }

    // ========================================================================
    // Token
    // ========================================================================

    fn login(&self, token: Option<String>) -> Result<()> {
        let token = match token {
            Some(token) => token,
            None => {
                let mut line = String::new();
                std::io::stdin()
                    .lock()
                    .read_line(&mut line)
                    .context("failed to read token from stdin")?;
                line
            }
        };
        let token = token.trim();
        if token.is_empty() {
            bail!("token must not be empty");
        }

        self.tokens.save(token)?;
        println!(
            "{}",
            output::success(format!("Token saved to {}", self.tokens.path().display()))
        );
        Ok(())
    }

    fn logout(&self) -> Result<()> {
        if self.tokens.clear()? {
            println!("{}", output::success("Logged out"));
        } else {
            println!("Not logged in");
        }
        Ok(())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    async fn list(&self, section_type: Option<String>) -> Result<()> {
        let sections = match section_type {
            Some(section_type) => {
                let mut sections = self
                    .client()?
                    .list_by_type(&section_type)
                    .await
                    .map_err(|e| anyhow!(e.user_message()))?;
                sections.retain(|s| s.homepage_id == self.homepage);
                sections
            }
            None => self.sections().await?,
        };

        println!("{}", output::section_table(&sections));
        Ok(())
    }

    async fn show(&self, id: &str) -> Result<()> {
        let sections = self.sections().await?;
        let id = resolve_id(&sections, id)?;
        let section = sections
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| anyhow!("no section matches '{id}'"))?;

        println!("{}", serde_json::to_string_pretty(section)?);
        Ok(())
    }

    async fn render(&self, preview: bool, output: Option<PathBuf>) -> Result<()> {
        let sections = self.sections().await?;
        let mode = if preview {
            RenderMode::Preview
        } else {
            RenderMode::Public
        };
        let html = HomepageRenderer::default().render(&sections, mode);

        match output {
            Some(path) => {
                tokio::fs::write(&path, html)
                    .await
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("{}", output::success(format!("Wrote {}", path.display())));
            }
            None => println!("{html}"),
        }
        Ok(())
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    async fn add(&self, component: &str, name: String, enabled: bool) -> Result<()> {
        let kind = SectionKind::parse_loose(component).ok_or_else(|| {
            let known: Vec<&str> = SectionKind::ALL.iter().map(|k| k.component_name()).collect();
            anyhow!(
                "unknown component '{component}', expected one of: {}",
                known.join(", ")
            )
        })?;

        let mut editor = self.editor().await?;
        let section = editor
            .add_section(kind, name, enabled)
            .await
            .map_err(explain)?;

        println!(
            "{}",
            output::success(format!(
                "Added '{}' ({}) at position {}",
                section.name,
                output::short_id(&section.id),
                editor.cards().len()
            ))
        );
        Ok(())
    }

    async fn toggle(&self, id: &str) -> Result<()> {
        let mut editor = self.editor().await?;
        let id = resolve_id(&editor.sections(), id)?;
        let section = editor.toggle(id).await.map_err(explain)?;

        let state = if section.enabled { "Enabled" } else { "Disabled" };
        println!("{}", output::success(format!("{state} '{}'", section.name)));
        Ok(())
    }

    async fn move_to(&self, id: &str, position: u32) -> Result<()> {
        let mut editor = self.editor().await?;
        let id = resolve_id(&editor.sections(), id)?;
        let index = position.saturating_sub(1) as usize;
        editor.move_section(id, index).await.map_err(explain)?;

        println!("{}", output::section_table(&editor.sections()));
        Ok(())
    }

    async fn edit(&self, id: &str, assignments: &[String], data_file: Option<&Path>) -> Result<()> {
        let mut editor = self.editor().await?;
        let id = resolve_id(&editor.sections(), id)?;
        editor.begin_edit(id)?;

        if let Some(path) = data_file {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let payload: Value = serde_json::from_str(&text)
                .with_context(|| format!("{} is not valid JSON", path.display()))?;
            let component = editor
                .card(id)
                .map(|card| card.section().component().to_string())
                .unwrap_or_default();
            editor.replace_data(id, SectionData::from_parts(&component, payload)?)?;
        }

        for assignment in assignments {
            let (key, value) = parse_assignment(assignment)?;
            set_field(&mut editor, id, &key, value)?;
        }

        let section = editor.save(id).await.map_err(explain)?;
        println!("{}", output::success(format!("Saved '{}'", section.name)));
        Ok(())
    }

    async fn rename(&self, id: &str, name: String) -> Result<()> {
        let mut editor = self.editor().await?;
        let id = resolve_id(&editor.sections(), id)?;
        editor.begin_edit(id)?;
        editor.edit_name(id, name)?;

        let section = editor.save(id).await.map_err(explain)?;
        println!("{}", output::success(format!("Renamed to '{}'", section.name)));
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let mut editor = self.editor().await?;
        let id = resolve_id(&editor.sections(), id)?;
        let name = editor
            .card(id)
            .map(|card| card.section().name.clone())
            .unwrap_or_default();
        editor.remove_section(id).await.map_err(explain)?;

        println!("{}", output::success(format!("Removed '{name}'")));
        Ok(())
    }

    async fn upload(&self, id: &str, slot: ImageSlot, file: PathBuf) -> Result<()> {
        let bytes = tokio::fs::read(&file)
            .await
            .with_context(|| format!("failed to read {}", file.display()))?;
        let file_name = file
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("{} has no usable file name", file.display()))?
            .to_string();

        let mut editor = self.editor().await?;
        let id = resolve_id(&editor.sections(), id)?;
        let section = editor
            .upload_image(id, slot, ImageFile::new(file_name, bytes))
            .await
            .map_err(explain)?;

        println!(
            "{}",
            output::success(format!("Uploaded {slot:?} image for '{}'", section.name))
        );
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Match a full id or a unique prefix of one
pub fn resolve_id(sections: &[Section], input: &str) -> Result<SectionId> {
    let needle: String = input
        .trim()
        .to_ascii_lowercase()
        .chars()
        .filter(|c| *c != '-')
        .collect();
    if needle.is_empty() {
        bail!("section id must not be empty");
    }

    let matches: Vec<SectionId> = sections
        .iter()
        .map(|s| s.id)
        .filter(|id| id.simple().to_string().starts_with(&needle))
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => bail!("no section matches '{input}'"),
        _ => bail!("'{input}' matches {} sections, use more characters", matches.len()),
    }
}

/// Split `key=value`; the value is JSON when it parses, a string otherwise
pub fn parse_assignment(input: &str) -> Result<(String, Value)> {
    let (key, raw) = input
        .split_once('=')
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got '{input}'"))?;
    let key = key.trim();
    if key.is_empty() {
        bail!("missing key in '{input}'");
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// Set a field, retrying as a plain string when the JSON reading of the
/// value has the wrong type (`value=42` on a text field)
fn set_field<A: SectionApi>(
    editor: &mut SectionEditor<A>,
    id: SectionId,
    key: &str,
    value: Value,
) -> Result<()> {
    match editor.edit_field(id, key, value.clone()) {
        Ok(()) => Ok(()),
        Err(err) if !value.is_string() => {
            let text = match &value {
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => "null".to_string(),
                _ => return Err(explain(err)),
            };
            editor
                .edit_field(id, key, Value::String(text))
                .map_err(|_| explain(err))
        }
        Err(err) => Err(explain(err)),
    }
}

/// User-facing text for an editor failure
fn explain(err: EditorError) -> anyhow::Error {
    match err {
        EditorError::Client(client) => anyhow!(client.user_message()),
        other => anyhow!(other),
    }
}
