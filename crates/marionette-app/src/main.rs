mod cli;
mod demo;
mod replay;

use std::io::Write;

use marionette_bridge::JsonLinesTransport;
use marionette_common::Result;
use marionette_config::MarionetteConfig;
use marionette_widgets::{build_layout, LayoutNode, Selector, WidgetKey, WidgetTree};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse();

    // Config is read before logging so its level can seed the filter; any
    // failure is reported once the subscriber is up.
    let loaded = match &args.config {
        Some(path) => marionette_config::load_config_from(path),
        None => marionette_config::load_config(),
    };
    let (config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (MarionetteConfig::default(), Some(e)),
    };

    let log_directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.directive());
    let mut filter = EnvFilter::from_default_env();
    for directive in log_directive.split(',') {
        match directive.parse() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("ignoring log directive {directive:?}: {e}"),
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Marionette v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    if let Some(e) = config_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    if let Err(e) = run(&args, &config) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}

fn run(args: &cli::Args, config: &MarionetteConfig) -> Result<()> {
    let transport = JsonLinesTransport::new(std::io::stdout());
    let mut tree = WidgetTree::from_config(config, transport);

    let (layout, is_demo) = match &args.layout {
        Some(path) => (LayoutNode::from_path(path)?, false),
        None => (demo::layout()?, true),
    };
    let root = build_layout(&mut tree, &layout)?;
    tracing::info!(widgets = tree.len(), "layout built");

    let counter = if is_demo {
        Some(demo::Counter::attach(&mut tree, root)?)
    } else {
        None
    };
    tree.bridge_mut().flush()?;

    for raw in &args.selectors {
        print_selection(&tree, root, raw)?;
    }

    if args.replay {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .build()?;
        runtime.block_on(replay::run(&mut tree, counter))?;
    }

    tree.bridge_mut().flush()?;
    Ok(())
}

/// Print the object ids matching `raw` below `root` as one JSON line.
fn print_selection(tree: &WidgetTree, root: WidgetKey, raw: &str) -> Result<()> {
    let selector = Selector::parse(raw)?;
    let matches = tree.collection(root).find(tree, Some(&selector));
    let ids = matches
        .iter()
        .map(|key| tree.object_id(key).map(|id| id.to_string()))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    tracing::debug!(selector = raw, matches = ids.len(), "selection");

    let line = json!({ "select": raw, "matches": ids });
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{line}")?;
    stdout.flush()?;
    Ok(())
}
