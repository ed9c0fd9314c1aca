use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use mailsmith::config::Config;
use mailsmith::document::{self, EmailDocument, RenderOptions};
use mailsmith::draft::{draft_document, generate_draft};
use mailsmith::storage::AssetStore;
use mailsmith::textgen::{
    ChatClient, DEFAULT_IDEA_CATEGORY, DEFAULT_SYSTEM_PROMPT, TextGenerator, code_prompt,
    idea_prompt,
};
use mailsmith::{Error, Escaping, Result, Theme, blocks, parse_document};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A pure Rust block-based HTML email builder
#[derive(Parser, Debug)]
#[command(name = "mailsmith")]
#[command(version)]
#[command(about = "Build table-based HTML emails from block documents", long_about = None)]
struct Args {
    /// Path to a TOML config file (defaults to ./mailsmith.toml when present)
    #[arg(long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a document (JSON, YAML or TOML) to HTML
    Render {
        /// Input document (use "-" for JSON on stdin)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output HTML file (stdout when omitted)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Built-in theme name or path to a theme file (TOML or YAML)
        #[arg(short, long, value_name = "THEME")]
        theme: Option<String>,

        /// HTML-escape user-supplied text and drop unsafe color tokens
        #[arg(long)]
        escape: bool,

        /// Print {"id", "html"} as JSON instead of bare HTML
        #[arg(long)]
        json: bool,
    },

    /// Build a header + hero draft from a free-text prompt
    Draft {
        /// Text placed into the hero description
        prompt: String,

        /// Ask the language model to write the hero text from the prompt
        #[arg(long)]
        generate: bool,

        /// Print the draft document instead of rendering it
        #[arg(long = "document")]
        print_document: bool,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Copy an image into asset storage and print its /storage/ path
    Upload {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Read an asset back from storage
    Fetch {
        /// Path as returned by upload, e.g. /storage/abc123.png
        #[arg(value_name = "PATH")]
        path: String,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Send a prompt to the language model
    Ask {
        prompt: String,

        /// System prompt (defaults to the assistant prompt)
        #[arg(long)]
        system: Option<String>,
    },

    /// Generate a project idea for a category
    Idea {
        #[arg(short, long, default_value = DEFAULT_IDEA_CATEGORY)]
        category: String,
    },

    /// Generate code for a task in a language
    Code {
        #[arg(short, long)]
        language: String,

        #[arg(short, long)]
        task: String,
    },

    /// List registered block types
    Blocks,

    /// List built-in themes
    Themes,

    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<(), String> {
    env_logger::builder()
        .format_timestamp(None)
        .format_module_path(true)
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = Args::parse();
    run(args).map_err(|e| e.to_string())
}

fn run(args: Args) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;

    match args.command {
        Command::Render {
            input,
            output,
            theme,
            escape,
            json,
        } => {
            let mut doc = read_document(&input)?;
            let registry = blocks::builtin();
            for block in doc.blocks.iter().filter(|b| b.enabled) {
                if !registry.contains(&block.kind) {
                    log::warn!("unknown block type '{}' renders nothing", block.kind);
                }
            }
            if let Some(theme) = theme.or_else(|| config.theme.clone()) {
                let preset = load_theme(&theme)?;
                doc.theme = Some(preset.merged_with(doc.theme.as_ref()));
            }

            let options = RenderOptions {
                escaping: if escape || config.escape {
                    Escaping::Html
                } else {
                    Escaping::Raw
                },
            };
            let rendered = document::render_with(&doc, registry, options);
            log::info!("rendered {} ({} bytes)", rendered.id, rendered.html.len());

            let text = if json {
                serde_json::to_string_pretty(&rendered)?
            } else {
                rendered.html
            };
            emit(output.as_deref(), text.as_bytes(), "HTML")?;
        }
        Command::Draft {
            prompt,
            generate,
            print_document,
            output,
        } => {
            let doc = if generate {
                let client = ChatClient::new(&config.text_gen)?;
                generate_draft(&client, &prompt)
            } else {
                draft_document(&prompt)
            };

            let text = if print_document {
                serde_json::to_string_pretty(&doc)?
            } else {
                serde_json::to_string_pretty(&document::render(&doc))?
            };
            emit(output.as_deref(), text.as_bytes(), "Draft")?;
        }
        Command::Upload { file } => {
            let store = open_store(&config)?;
            let bytes = std::fs::read(&file)?;
            let name = file
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| Error::Usage(format!("{} has no file name", file.display())))?;
            let url = store.put(name, &bytes)?;
            println!("{}", url);
        }
        Command::Fetch { path, output } => {
            let store = open_store(&config)?;
            let asset = store.get(&path)?;
            eprintln!("Content-Type: {}", asset.content_type);
            emit(output.as_deref(), &asset.bytes, "Asset")?;
        }
        Command::Ask { prompt, system } => {
            let client = ChatClient::new(&config.text_gen)?;
            let system = system.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT);
            let answer = client.complete(&prompt, Some(system))?;
            println!("{}", answer);
        }
        Command::Idea { category } => {
            let client = ChatClient::new(&config.text_gen)?;
            let idea = client.complete(&idea_prompt(&category), None)?;
            println!("{}", idea);
        }
        Command::Code { language, task } => {
            let client = ChatClient::new(&config.text_gen)?;
            let code = client.complete(&code_prompt(&language, &task), None)?;
            println!("{}", code);
        }
        Command::Blocks => {
            for tag in blocks::builtin().tags() {
                println!("{}", tag);
            }
        }
        Command::Themes => {
            for name in Theme::list_builtins() {
                println!("{}", name);
            }
        }
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Args::command(), "mailsmith", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn read_document(input: &Path) -> Result<EmailDocument> {
    if input.to_str() == Some("-") {
        let mut buffer = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)?;
        return parse_document(&buffer, "json");
    }

    let content = std::fs::read_to_string(input)?;
    let format = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("json");
    parse_document(&content, format)
}

fn load_theme(theme: &str) -> Result<Theme> {
    let path = Path::new(theme);
    if !(path.exists() && path.is_file()) {
        return Theme::from_builtin(theme).map_err(Error::Theme);
    }

    let content = std::fs::read_to_string(path)?;

    // Try TOML first, then YAML
    if let Ok(theme) = Theme::from_toml(&content) {
        Ok(theme)
    } else if let Ok(theme) = Theme::from_yaml(&content) {
        Ok(theme)
    } else {
        Err(Error::Theme(format!(
            "failed to parse {} as TOML or YAML",
            path.display()
        )))
    }
}

fn open_store(config: &Config) -> Result<AssetStore> {
    Ok(AssetStore::open(&config.storage_root, config.cache_capacity)?)
}

fn emit(output: Option<&Path>, bytes: &[u8], what: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, bytes)?;
            eprintln!("{} saved to: {}", what, path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
