use std::{fs, io, path::Path};

use crate::{
    cache::QueryCache,
    config::ClientConfig,
    content::{Category, DraftPost, Post, validate},
    error,
    query::{FilterSpec, SortDirection, SortField},
    repository::HttpRepository,
};

const EXCERPT_CHARS: usize = 80;

const USAGE: &str = "\
Usage:
  blogdeck list [--search <text>] [--category <TAG>]... [--sort date|title] [--order asc|desc]
  blogdeck show <id>
  blogdeck create <draft.toml>";

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}\n\n{usage}", usage = USAGE)]
    Usage(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("draft rejected:\n{0}")]
    Invalid(String),

    #[error("{} ({})", .0, .0.kind())]
    Api(#[from] error::Error),
}

/// 命令行子命令
#[derive(Debug, PartialEq)]
pub enum Command {
    List(FilterSpec),
    Show(u64),
    Create(String),
}

impl Command {
    /// 解析命令行参数（不含程序名）
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::<String>::into);
        let usage = |msg: &str| CliError::Usage(msg.to_string());

        match args.next().as_deref() {
            Some("list") => {
                let mut spec = FilterSpec::default();
                while let Some(flag) = args.next() {
                    let value = args
                        .next()
                        .ok_or_else(|| usage(&format!("Missing value for {flag}")))?;
                    match flag.as_str() {
                        "--search" => spec.search_text = value,
                        "--category" => spec.categories.push(Category::from(value.to_uppercase())),
                        "--sort" => {
                            spec.sort_field = Some(match value.as_str() {
                                "date" => SortField::Date,
                                "title" => SortField::Title,
                                _ => return Err(usage(&format!("Unknown sort field: {value}"))),
                            })
                        }
                        "--order" => {
                            spec.sort_direction = match value.as_str() {
                                "asc" => SortDirection::Ascending,
                                "desc" => SortDirection::Descending,
                                _ => return Err(usage(&format!("Unknown sort order: {value}"))),
                            }
                        }
                        _ => return Err(usage(&format!("Unknown option: {flag}"))),
                    }
                }
                Ok(Command::List(spec))
            }
            Some("show") => {
                let id = args.next().ok_or_else(|| usage("Missing <id>"))?;
                let id = id
                    .parse()
                    .map_err(|_| usage(&format!("Invalid post id: {id}")))?;
                no_more(args)?;
                Ok(Command::Show(id))
            }
            Some("create") => {
                let path = args.next().ok_or_else(|| usage("Missing <draft.toml>"))?;
                no_more(args)?;
                Ok(Command::Create(path))
            }
            Some(other) => Err(usage(&format!("Unknown command: {other}"))),
            None => Err(usage("Missing command")),
        }
    }
}

fn no_more(mut args: impl Iterator<Item = String>) -> Result<(), CliError> {
    match args.next() {
        Some(_) => Err(CliError::Usage("Too many arguments provided.".to_string())),
        None => Ok(()),
    }
}

/// 从 TOML 文件读取草稿，字段名与接口一致
///
/// ```toml
/// title = "Future of Fintech"
/// category = ["FINANCE", "TECH"]
/// description = "..."
/// coverImage = "https://..."
/// content = """..."""
/// ```
pub fn load_draft(path: impl AsRef<Path>) -> Result<DraftPost, CliError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// 执行子命令，返回要打印的文本
pub async fn execute(
    cache: &QueryCache<HttpRepository>,
    command: Command,
) -> Result<String, CliError> {
    match command {
        Command::List(spec) => {
            let posts = cache.browse(&spec).await?;
            let mut out: Vec<String> = posts.iter().map(render_card).collect();
            out.push(format!(
                "Showing {} {}",
                posts.len(),
                if posts.len() == 1 { "blog" } else { "blogs" }
            ));
            Ok(out.join("\n"))
        }
        Command::Show(id) => {
            let detail = cache.detail(id).await?;
            let mut out = vec![render_full(&detail.post)];
            if !detail.related.is_empty() {
                out.push("Related Posts".to_string());
                out.extend(detail.related.iter().map(render_card));
            }
            Ok(out.join("\n\n"))
        }
        Command::Create(path) => {
            let draft = load_draft(&path)?;
            let errors = validate(&draft);
            if !errors.is_empty() {
                let lines: Vec<String> = errors
                    .iter()
                    .map(|(field, msg)| format!("  {field}: {msg}"))
                    .collect();
                return Err(CliError::Invalid(lines.join("\n")));
            }

            let post = cache.create(&draft).await?;
            Ok(format!("created #{} {}", post.id, post.title))
        }
    }
}

fn render_card(post: &Post) -> String {
    let categories: Vec<&str> = post.categories.iter().map(Category::as_str).collect();
    format!(
        "#{:<4} {}  [{}]  {}\n      {}",
        post.id,
        post.title,
        categories.join(", "),
        post.display_date(),
        post.excerpt(EXCERPT_CHARS)
    )
}

fn render_full(post: &Post) -> String {
    let mut out = format!("{}\n{}", post.title, post.display_date());
    if let Some(author) = &post.author {
        out.push_str(&format!("\nby {author}"));
        if let Some(title) = &post.author_title {
            out.push_str(&format!(", {title}"));
        }
    }
    out.push_str(&format!("\n\n{}\n\n{}", post.description, post.content));
    out
}

/// 命令行入口
pub async fn run() {
    let command = match Command::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let cache = match ClientConfig::from_env().and_then(|c| HttpRepository::new(&c)) {
        Ok(repo) => QueryCache::new(repo),
        Err(e) => {
            tracing::error!(error = %e, "failed to initialise client");
            std::process::exit(1);
        }
    };

    match execute(&cache, command).await {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
