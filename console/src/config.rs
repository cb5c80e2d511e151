use std::fmt::Display;

use clap::{
    Args,
    ValueEnum,
};

use crate::strings::{
    app,
    help,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    Wide,
    Centered,
}

impl Display for Layout {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let str = match self {
            Layout::Wide => "wide",
            Layout::Centered => "centered",
        };
        write!(f, "{}", str)
    }
}

/// Presentation settings of the report, read once at startup.
///
/// Every field can be set by flag or by its `APP_*` environment variable;
/// the flag wins.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    #[arg(
        long,
        global = true,
        env = "APP_PAGE_TITLE",
        default_value = app::PAGE_TITLE
    )]
    pub page_title: String,

    #[arg(long, global = true, env = "APP_TITLE", default_value = app::TITLE)]
    pub title: String,

    #[arg(
        long,
        global = true,
        env = "APP_LAYOUT",
        value_enum,
        default_value = app::LAYOUT,
        help = help::LAYOUT
    )]
    pub layout: Layout,

    #[arg(
        long,
        global = true,
        env = "APP_CAPTION",
        default_value = app::CAPTION
    )]
    pub caption: String,

    #[arg(
        long,
        global = true,
        env = "APP_DESCRIPTION",
        default_value = app::DESCRIPTION
    )]
    pub description: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_title:  app::PAGE_TITLE.to_string(),
            title:       app::TITLE.to_string(),
            layout:      Layout::Wide,
            caption:     app::CAPTION.to_string(),
            description: app::DESCRIPTION.to_string(),
        }
    }
}
