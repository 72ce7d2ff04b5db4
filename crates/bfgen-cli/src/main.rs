//! `bfgen TEXT...`: every argument is text. There are no options, so words
//! like `--help` or `--` are encoded like any other word.

use std::ffi::OsString;
use std::io::Write as _;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};

use bfgen_core::{encode, join_args};

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn try_main() -> Result<()> {
    let words = collect_words(std::env::args_os().skip(1))?;
    let Some(script) = script_for(&words) else {
        return Ok(());
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{script}").context("write script")?;
    stdout.flush().context("flush stdout")?;
    Ok(())
}

fn collect_words<I>(args: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .enumerate()
        .map(|(idx, arg)| {
            arg.into_string()
                .map_err(|arg| anyhow!("argument {} is not valid UTF-8: {arg:?}", idx + 1))
        })
        .collect()
}

/// `None` when there is nothing to print at all.
fn script_for(words: &[String]) -> Option<String> {
    if words.is_empty() {
        return None;
    }
    Some(encode(&join_args(words)))
}
