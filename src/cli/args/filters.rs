//! Launch filter arguments

use clap::Args;

use crate::filter::FilterIntents;

/// Filters applied server-side to the launch listing.
///
/// Tags and attributes accept both repeated flags and comma-separated values:
/// `--attr env=prod --attr team=core` or `--attr env=prod,team=core`.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Name filter to exclude: hide launches whose name contains this
    #[arg(long = "name", short = 'n', value_name = "NAME")]
    pub name_excludes: Option<String>,

    /// Only launches whose name contains this
    #[arg(long, value_name = "NAME")]
    pub name_contains: Option<String>,

    /// Launch status (passed, failed, stopped, interrupted, in_progress)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Launch tags
    #[arg(long, short = 't', value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Started after (YYYY-MM-DD or epoch milliseconds)
    #[arg(long)]
    pub start_from: Option<String>,

    /// Started before (YYYY-MM-DD, inclusive of that day, or epoch milliseconds)
    #[arg(long)]
    pub start_to: Option<String>,

    /// Attribute filter KEY=VALUE (repeatable)
    #[arg(long = "attr", value_name = "KEY=VALUE", value_delimiter = ',')]
    pub attributes: Vec<String>,
}

impl FilterArgs {
    pub fn to_intents(&self) -> FilterIntents {
        FilterIntents {
            status: self.status.clone(),
            name_contains: self.name_contains.clone(),
            name_excludes: self.name_excludes.clone(),
            tags: self.tags.clone(),
            start_from: self.start_from.clone(),
            start_to: self.start_to.clone(),
            attributes: self.attributes.clone(),
        }
    }
}
