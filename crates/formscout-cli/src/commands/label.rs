//! Match command - resolve a single field label from the command line.

use clap::Args;
use console::style;

use formscout_core::matching::{AssistedMatcher, MatchResolver};
use formscout_core::{FieldKind, FieldRegion, Rect};

/// Arguments for the match command.
#[derive(Args)]
pub struct MatchArgs {
    /// Field label text
    #[arg(required = true)]
    label: String,

    /// Field kind
    #[arg(short, long, value_enum, default_value = "single-line")]
    kind: KindArg,

    /// Disable the AI-assisted matcher
    #[arg(long)]
    no_assist: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum KindArg {
    SingleLine,
    MultiLine,
    Selector,
    FileUpload,
}

impl From<KindArg> for FieldKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::SingleLine => FieldKind::SingleLine,
            KindArg::MultiLine => FieldKind::MultiLine,
            KindArg::Selector => FieldKind::Selector,
            KindArg::FileUpload => FieldKind::FileUpload,
        }
    }
}

pub async fn run(args: MatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::scan::load_config(config_path)?;

    let assist = if args.no_assist {
        None
    } else {
        AssistedMatcher::new(config.assist.clone())
    };
    let resolver = MatchResolver::new()
        .with_assist(assist)
        .with_config(config.matching.clone());

    let region = FieldRegion::new(Rect::new(0, 0, 1, 1), args.kind.into(), 1.0)
        .with_label(args.label.as_str());

    match resolver.resolve_field(&region).await {
        Some(m) => {
            println!(
                "{} {} ({:.0}%)",
                style("✓").green(),
                m.key,
                m.confidence * 100.0
            );
            println!("  {}", m.rationale);
        }
        None => println!("{} no match for {:?}", style("✗").red(), args.label),
    }

    Ok(())
}
