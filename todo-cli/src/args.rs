use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Long flags that may also be written with a single dash (`-action=show`)
const LONG_FLAGS: &[&str] = &["action", "description", "status", "Id", "data"];

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "todo")]
#[command(about = "Manage todo items stored in a JSON file", long_about = None)]
pub struct Args {
    /// Selected action: show, create, update or delete
    #[arg(long, default_value = "show")]
    pub action: String,

    /// Description of to do item
    #[arg(long, default_value = " ", allow_hyphen_values = true)]
    pub description: String,

    /// Status of to do item: NOT STARTED, STARTED or COMPLETED
    #[arg(long, default_value = "NOT STARTED")]
    pub status: String,

    /// Mandatory for both update/delete actions
    #[arg(long = "Id", default_value_t = 0, allow_hyphen_values = true)]
    pub id: i64,

    /// Data file, overrides config/todo.toml and TODO_DATA_PATH
    #[arg(long)]
    pub data: Option<PathBuf>,
}

impl Args {
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize(std::env::args_os()))
    }

    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize(args))
    }
}

/// Rewrite `-name[=value]` to `--name[=value]` for the known long flags.
/// The first item is the program name and is left alone.
pub fn normalize<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 {
                return arg;
            }
            match arg.to_str() {
                Some(s) if is_single_dash_long(s) => OsString::from(format!("-{}", s)),
                _ => arg,
            }
        })
        .collect()
}

fn is_single_dash_long(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') {
        return false;
    }
    let name = rest.split('=').next().unwrap_or(rest);
    LONG_FLAGS.contains(&name)
}
