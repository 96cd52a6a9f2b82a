use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use aisle_explorer::camera::CameraPose;
use aisle_explorer::cli::Cli;
use aisle_explorer::headless::{HeadlessRenderer, LogPresenter};
use aisle_explorer::interaction::InteractionMode;
use aisle_explorer::loaders::GltfLoader;
use aisle_explorer::session::{AisleSession, ClickOutcome};
use aisle_explorer::shelf::ProductRecord;

// === Constants ===

const FRAME_STEP: f32 = 1.0 / 60.0;
/// Upper bound on frames spent waiting for one camera transition
const MAX_SETTLE_FRAMES: u32 = 60 * 30;

type Session = AisleSession<HeadlessRenderer, LogPresenter>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClickReport {
    x: f32,
    y: f32,
    ignored: bool,
    selected: Option<ProductRecord>,
    pose: CameraPose,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    shelves: usize,
    products: Vec<ProductRecord>,
    aisle_pose: CameraPose,
    clicks: Vec<ClickReport>,
    mode: InteractionMode,
    final_pose: CameraPose,
    frames: u64,
}

/// Runs fixed-step frames until the camera transition in flight finishes.
fn settle(session: &mut Session) -> u32 {
    let mut frames = 0;
    while session.is_transition_pending() && frames < MAX_SETTLE_FRAMES {
        session.update(FRAME_STEP);
        frames += 1;
    }
    frames
}

fn print_text(report: &Report) {
    println!("Shelves: {}", report.shelves);
    println!("Products: {}", report.products.len());
    for product in &report.products {
        println!(
            "  {:<24} {:<28} {}",
            product.mesh_id, product.product_name, product.product_id
        );
    }
    println!(
        "Aisle view: position {:?} target {:?}",
        report.aisle_pose.position, report.aisle_pose.target
    );
    for click in &report.clicks {
        let outcome = match (&click.selected, click.ignored) {
            (_, true) => "ignored".to_string(),
            (Some(product), _) => format!("selected {} ({})", product.product_name, product.mesh_id),
            (None, _) => "nothing selectable".to_string(),
        };
        println!("Click ({}, {}): {}", click.x, click.y, outcome);
    }
    println!(
        "Final: {:?} mode, position {:?} target {:?} after {} frames",
        report.mode, report.final_pose.position, report.final_pose.target, report.frames
    );
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = cli.aisle_config().context("Failed to load aisle configuration")?;
    let loader = match cli.asset_dir() {
        Some(dir) => GltfLoader::with_base_dir(dir),
        None => GltfLoader::new(),
    };

    let mut session = AisleSession::new(
        config.session.clone(),
        HeadlessRenderer::new(cli.width, cli.height),
        LogPresenter::default(),
        cli.width,
        cli.height,
    );
    let rejected = pollster::block_on(session.setup(&config.shelves, &loader));
    for err in &rejected {
        eprintln!("Warning: {err}");
    }
    session.update(FRAME_STEP);

    let products = session
        .shelves()
        .shelves()
        .iter()
        .flat_map(|shelf| shelf.products().iter().cloned())
        .collect();
    let aisle_pose = session.cameras().default_pose();

    let mut clicks = Vec::new();
    for event in &cli.clicks {
        let outcome = session.on_click(*event);
        settle(&mut session);
        let (ignored, selected) = match outcome {
            ClickOutcome::Ignored => (true, None),
            ClickOutcome::Missed => (false, None),
            ClickOutcome::Selected(record) => (false, Some(record)),
        };
        clicks.push(ClickReport {
            x: event.client_x,
            y: event.client_y,
            ignored,
            selected,
            pose: session.cameras().pose(),
        });
    }

    if cli.back && session.back() {
        settle(&mut session);
    }

    let report = Report {
        shelves: session.shelves().shelves().len(),
        products,
        aisle_pose,
        clicks,
        mode: session.mode(),
        final_pose: session.cameras().pose(),
        frames: session.renderer().frames,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }

    session.dispose();
    Ok(())
}
