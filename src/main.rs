use anyhow::{Context, Result};
use tokio::io::AsyncBufReadExt;

use ddcdim::config::Config;
use ddcdim::monitor::Control;
use ddcdim::overlay::Compositor;
use ddcdim::panel::{PanelMsg, PanelState};

#[macro_use]
extern crate tracing;

fn setup_logs() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = fmt::layer().with_target(false);
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new(format!(
        "warn,{}=info",
        env!("CARGO_CRATE_NAME")
    )));

    if let Ok(journal_layer) = tracing_journald::layer() {
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .with(journal_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init();
    }
}

/// Stand-in for the shell compositor: reports overlay transitions instead of
/// drawing a layer.
struct LogCompositor;

impl Compositor for LogCompositor {
    fn show(&self, monitor: usize, alpha: u8) {
        info!("overlay on monitor {monitor}, alpha {alpha}");
    }

    fn hide(&self, monitor: usize) {
        info!("overlay off monitor {monitor}");
    }
}

fn print_monitors(panel: &PanelState) {
    for monitor in panel.monitors() {
        let values = if monitor.ddc_capable {
            let b = panel
                .slider_value(monitor.index, Control::Brightness)
                .map_or("?".into(), |v| v.to_string());
            let c = panel
                .slider_value(monitor.index, Control::Contrast)
                .map_or("?".into(), |v| v.to_string());
            format!("brightness {b}, contrast {c}")
        } else {
            "no DDC/CI, dimming only".to_string()
        };
        let dim = panel.dim_percent(monitor.index).unwrap_or(0);
        println!(
            "[{}] {} (bus {}): {}, dim {dim}%",
            monitor.index, monitor.name, monitor.bus, values
        );
    }
}

fn parse_control(word: &str) -> Option<Control> {
    match word {
        "brightness" => Some(Control::Brightness),
        "contrast" => Some(Control::Contrast),
        _ => None,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    setup_logs();

    let config = Config::load();
    let mut panel = PanelState::enable(config, Box::new(LogCompositor)).await;

    if panel.monitors().is_empty() {
        warn!("no monitors detected, only `quit` will do anything useful");
    }
    print_monitors(&panel);
    println!("commands: list | set <monitor> <brightness|contrast> <0-100> | dim <monitor> <0-100> | overview <on|off> | reseed | quit");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["list"] => print_monitors(&panel),
            ["reseed"] => {
                panel.reseed().await;
                print_monitors(&panel);
            }
            ["set", monitor, control, value] => {
                match (
                    monitor.parse(),
                    parse_control(control),
                    value.parse(),
                ) {
                    (Ok(monitor), Some(control), Ok(value)) => {
                        panel.update(PanelMsg::SliderChanged {
                            monitor,
                            control,
                            value,
                        });
                    }
                    _ => println!("usage: set <monitor> <brightness|contrast> <0-100>"),
                }
            }
            ["dim", monitor, percent] => match (monitor.parse(), percent.parse()) {
                (Ok(monitor), Ok(percent)) => {
                    panel.update(PanelMsg::DimChanged { monitor, percent });
                }
                _ => println!("usage: dim <monitor> <0-100>"),
            },
            ["overview", "on"] => panel.update(PanelMsg::OverviewShown),
            ["overview", "off"] => panel.update(PanelMsg::OverviewHidden),
            _ => println!("unknown command: {line}"),
        }
    }

    panel.disable();
    Ok(())
}
