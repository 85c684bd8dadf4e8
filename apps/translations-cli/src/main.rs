//! Operator CLI for the translation service

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use translation_service::config::Config;
use translation_service::domain::{export, import, resolve_value};
use translation_service::{
    normalize_locale, OwnerKind, OwnerRef, SupportedLanguage, TranslationEntry,
    TranslationServiceModule,
};

/// Default filter when `RUST_LOG` is not provided
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Parser)]
#[command(name = "translations", version, about = "Manage entity translations")]
struct Cli {
    /// YAML config file; `TRANSLATIONS_*` environment variables override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply pending migrations
    Migrate,
    /// List supported languages
    Languages {
        /// Include inactive languages
        #[arg(long)]
        all: bool,
    },
    /// Toggle whether a language accepts writes
    SetLanguage {
        code: String,
        /// `true` or `false`
        #[arg(action = clap::ArgAction::Set)]
        active: bool,
    },
    /// Register a new language
    AddLanguage {
        code: String,
        name: String,
        #[arg(long)]
        native_name: Option<String>,
        #[arg(long)]
        rtl: bool,
        #[arg(long, default_value_t = 0)]
        sort_order: i32,
        #[arg(long = "alias")]
        aliases: Vec<String>,
    },
    /// Show an owner's translations, e.g. `show store:12`
    Show {
        owner: OwnerRef,
        /// Resolve each field for this locale instead of listing rows
        #[arg(long)]
        locale: Option<String>,
    },
    /// Write entries given as `key:locale=value`
    Set {
        owner: OwnerRef,
        #[arg(required = true)]
        entries: Vec<String>,
    },
    /// Write the multilingual columns of one import row, given as `column=value`
    Import {
        owner: OwnerRef,
        #[arg(required = true)]
        columns: Vec<String>,
    },
    /// Print the multilingual export columns of an owner
    Export { owner: OwnerRef },
    /// Print import template headers for an owner kind
    Template {
        kind: OwnerKind,
        /// Headers placed before the multilingual columns
        #[arg(long = "base")]
        base: Vec<String>,
    },
    /// Remove every translation of an owner
    Purge { owner: OwnerRef },
    /// Print the canonical form of a language code
    Normalize { code: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logging() {
        eprintln!("error: {err:#}");
        std::process::exit(2);
    }

    if let Err(err) = run(cli).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_LEVEL))
        .map_err(|err| anyhow!("invalid log filter: {err}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

async fn run(cli: Cli) -> Result<()> {
    tracing::debug!(command = ?cli.command, "running command");

    // No database needed
    if let Command::Normalize { code } = &cli.command {
        println!("{}", normalize_locale(code));
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;
    let module = TranslationServiceModule::new(config);

    if let Command::Migrate = cli.command {
        let db = module.connect().await?;
        TranslationServiceModule::migrate(&db).await?;
        println!("migrations applied");
        return Ok(());
    }

    module.init().await.context("failed to initialize translation service")?;
    let service = module.service()?;

    match cli.command {
        Command::Languages { all } => {
            for language in service.list_languages(!all).await? {
                print_json(&language_json(&language))?;
            }
        }
        Command::SetLanguage { code, active } => {
            let language = service.set_language_active(&code, active).await?;
            print_json(&language_json(&language))?;
        }
        Command::AddLanguage {
            code,
            name,
            native_name,
            rtl,
            sort_order,
            aliases,
        } => {
            let mut language = SupportedLanguage::new(code, name);
            if let Some(native_name) = native_name {
                language.native_name = native_name;
            }
            if rtl {
                language.direction = translation_service::TextDirection::Rtl;
            }
            language.sort_order = sort_order;
            language.aliases = aliases;
            let created = service.register_language(language).await?;
            print_json(&language_json(&created))?;
        }
        Command::Show { owner, locale } => {
            let rows = service.load_translations(owner).await?;
            match locale {
                Some(locale) => {
                    let fields: serde_json::Map<String, Value> = owner
                        .kind
                        .translatable_fields()
                        .iter()
                        .map(|field| {
                            let value = resolve_value(&rows, field, &locale)
                                .map_or(Value::Null, |v| Value::String(v.to_string()));
                            (field.to_string(), value)
                        })
                        .collect();
                    print_json(&json!({
                        "owner": owner.to_string(),
                        "locale": locale,
                        "fields": fields,
                    }))?;
                }
                None => {
                    for row in rows {
                        print_json(&json!({
                            "id": row.id,
                            "locale": row.locale,
                            "key": row.key,
                            "value": row.value,
                            "updated_at": row.updated_at.to_rfc3339(),
                        }))?;
                    }
                }
            }
        }
        Command::Set { owner, entries } => {
            let entries = entries
                .iter()
                .map(String::as_str)
                .map(parse_entry)
                .collect::<Result<Vec<_>>>()?;
            let outcome = service.upsert_translations(owner, entries).await?;
            println!(
                "{}: {} translations, {} default columns written",
                owner,
                outcome.translations.len(),
                outcome.defaults_written.len()
            );
        }
        Command::Import { owner, columns } => {
            let row = columns
                .iter()
                .map(|raw| {
                    raw.split_once('=')
                        .map(|(column, value)| (column.trim().to_string(), value.to_string()))
                        .ok_or_else(|| anyhow!("expected column=value, got '{raw}'"))
                })
                .collect::<Result<HashMap<_, _>>>()?;
            let registry = service.languages().await?;
            let entries = import::extract_entries(owner.kind, &row, &registry);
            if entries.is_empty() {
                println!("{}: no multilingual columns found", owner);
                return Ok(());
            }
            let outcome = service.upsert_translations(owner, entries).await?;
            println!("{}: {} translations imported", owner, outcome.translations.len());
        }
        Command::Export { owner } => {
            let rows = service.load_translations(owner).await?;
            let registry = service.languages().await?;
            let columns = export::export_columns(owner.kind, &rows, &registry);
            print_json(&json!(columns))?;
        }
        Command::Template { kind, base } => {
            let registry = service.languages().await?;
            let base: Vec<&str> = base.iter().map(String::as_str).collect();
            println!("{}", import::multilingual_headers(kind, &base, &registry).join(","));
        }
        Command::Purge { owner } => {
            let removed = service.delete_owner_translations(owner).await?;
            println!("{}: {} translations removed", owner, removed);
        }
        Command::Migrate | Command::Normalize { .. } => {}
    }

    Ok(())
}

/// Parse `key:locale=value`
fn parse_entry(raw: &str) -> Result<TranslationEntry> {
    let (target, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key:locale=value, got '{raw}'"))?;
    let (key, locale) = target
        .split_once(':')
        .ok_or_else(|| anyhow!("expected key:locale=value, got '{raw}'"))?;
    Ok(TranslationEntry::new(locale.trim(), key.trim(), value))
}

fn language_json(language: &SupportedLanguage) -> Value {
    json!({
        "code": language.code,
        "name": language.name,
        "native_name": language.native_name,
        "direction": language.direction.as_str(),
        "active": language.is_active,
        "default": language.is_default,
        "fallback": language.is_fallback,
        "sort_order": language.sort_order,
        "aliases": language.aliases,
    })
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
