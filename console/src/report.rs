use std::io::Write;

use console::{
    pad_str,
    style,
    Alignment,
    Term,
};

use crate::config::{
    AppConfig,
    Layout,
};

/// Width used for centered layouts.
const CENTERED_WIDTH: usize = 80;

fn aligned(
    text: &str,
    layout: Layout,
) -> String {
    match layout {
        Layout::Wide => text.to_string(),
        Layout::Centered => {
            pad_str(text, CENTERED_WIDTH, Alignment::Center, None).into_owned()
        },
    }
}

/// Sets the terminal title when stdout is a terminal.
pub fn set_page_title(config: &AppConfig) {
    let term = Term::stdout();
    if term.is_term() {
        term.set_title(&config.page_title);
    }
}

pub fn write_header<W: Write>(
    out: &mut W,
    config: &AppConfig,
) -> anyhow::Result<()> {
    writeln!(
        out,
        "{}",
        style(aligned(&config.title, config.layout)).bold()
    )?;
    writeln!(out, "{}", aligned(&config.description, config.layout))?;
    writeln!(out)?;
    Ok(())
}

pub fn write_section<W: Write>(
    out: &mut W,
    name: &str,
    body: &str,
) -> anyhow::Result<()> {
    writeln!(out, "{}", style(name).cyan().bold())?;
    writeln!(out, "{}", body)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_footer<W: Write>(
    out: &mut W,
    config: &AppConfig,
) -> anyhow::Result<()> {
    writeln!(
        out,
        "{}",
        style(aligned(&config.caption, config.layout)).dim()
    )?;
    Ok(())
}
