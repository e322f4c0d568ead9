//! Mimic CLI
//!
//! Inspect what a simulated browser exposes and run scripts against it.
//!
//! - `mimic browsers`: list the named browser presets
//! - `mimic model --browser ie-11`: print the object model of a browser
//! - `mimic run --browser ie-11 --xml script.js`: run a script

use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use mimic_host::{BrowserIdentity, DocumentKind, MemberKind, ModelBuilder, ObjectModel, Page, PageConfig};
use mimic_js::JsRuntime;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

/// Mimic: browser-accurate DOM host objects for headless scripts
#[derive(Parser, Debug)]
#[command(name = "mimic")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # What does IE 11 expose?
    mimic model --browser ie-11

    # The same, as JSON
    mimic model --browser ie-11 --json

    # Run a script against an XML document in IE 11
    mimic run --browser ie-11 --xml test.js

    # Inline script
    mimic run --script "document.createTextNode('ab').splitText(1).data"

ENVIRONMENT:
    MIMIC_BROWSER          default browser, e.g. firefox-115
    MIMIC_DOCUMENT_KIND    default document kind, html or xml
    RUST_LOG               log filter, e.g. mimic::console=debug
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the named browser presets
    Browsers,

    /// Print the object model of a browser
    Model {
        /// Browser to simulate, e.g. ie-11 or chrome-120
        #[arg(short, long, value_name = "BROWSER")]
        browser: Option<BrowserIdentity>,

        /// Only print this class
        #[arg(short, long, value_name = "CLASS")]
        class: Option<String>,

        /// Print the model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a script against an empty document
    Run {
        /// Script file to run
        #[arg(value_name = "FILE", required_unless_present = "script")]
        path: Option<PathBuf>,

        /// Run this source instead of a file
        #[arg(short, long, value_name = "SOURCE", conflicts_with = "path")]
        script: Option<String>,

        /// Browser to simulate, e.g. ie-11 or chrome-120
        #[arg(short, long, value_name = "BROWSER")]
        browser: Option<BrowserIdentity>,

        /// Use an XML document instead of HTML
        #[arg(long)]
        xml: bool,
    },
}

fn main() -> Result<()> {
    install_subscriber();
    let cli = Cli::parse();

    match cli.command {
        Command::Browsers => {
            print_browsers();
            Ok(())
        }
        Command::Model { browser, class, json } => {
            let config = page_config(browser, false)?;
            let model = ModelBuilder::global().build(config.browser);
            if json {
                println!("{}", serde_json::to_string_pretty(&*model)?);
            } else {
                print_model(&model, class.as_deref())?;
            }
            Ok(())
        }
        Command::Run {
            path,
            script,
            browser,
            xml,
        } => {
            let source = match (script, path) {
                (Some(source), _) => source,
                (None, Some(path)) => {
                    fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?
                }
                (None, None) => bail!("run needs a script file or --script"),
            };
            run_script(page_config(browser, xml)?, &source)
        }
    }
}

/// Log to stderr, `RUST_LOG` overriding the default of warnings plus
/// script console output.
fn install_subscriber() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{}=info", mimic_js::CONSOLE_TARGET)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Environment defaults overridden by command-line flags.
fn page_config(browser: Option<BrowserIdentity>, xml: bool) -> Result<PageConfig> {
    let mut config = PageConfig::from_env()?;
    if let Some(browser) = browser {
        config = config.browser(browser);
    }
    if xml {
        config = config.document_kind(DocumentKind::Xml);
    }
    Ok(config)
}

fn print_browsers() {
    for browser in BrowserIdentity::PRESETS {
        let marker = if browser == BrowserIdentity::default() {
            " (default)"
        } else {
            ""
        };
        println!("{}{}", browser.bold(), marker.dimmed());
    }
}

fn print_model(model: &ObjectModel, only: Option<&str>) -> Result<()> {
    if let Some(name) = only
        && !model.has_class(name)
    {
        bail!("{name} is not exposed by {}", model.browser);
    }

    println!("{} {}", "Object model for".dimmed(), model.browser.bold());
    for class in model.classes.iter().filter(|c| only.is_none_or(|name| c.name == name)) {
        println!();
        match class.parent {
            Some(parent) => println!("{} {} {}", class.name.cyan().bold(), "extends".dimmed(), parent.cyan()),
            None => println!("{}", class.name.cyan().bold()),
        }
        for member in &class.members {
            let kind = format!("{:<11}", member.kind.to_string());
            let kind = match member.kind {
                MemberKind::Getter | MemberKind::Setter => kind.green().to_string(),
                MemberKind::Method => kind.yellow().to_string(),
                MemberKind::Constructor => kind.magenta().to_string(),
                MemberKind::Constant | MemberKind::Class => kind.blue().to_string(),
            };
            println!("  {kind} {}", member.name);
        }
    }
    Ok(())
}

fn run_script(config: PageConfig, source: &str) -> Result<()> {
    tracing::debug!(browser = %config.browser, kind = ?config.document_kind, "running script");
    let mut runtime = JsRuntime::new(Page::new(config)).map_err(|e| anyhow!("creating runtime: {e}"))?;
    let value = runtime.execute(source).map_err(|e| anyhow!("uncaught {e}"))?;
    if !value.is_undefined() {
        println!("{}", value.display());
    }
    Ok(())
}
