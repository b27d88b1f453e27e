use inkflow::{HtmlRenderer, PipelineError, RenderConfig};
use std::env;
use std::fs;

/// Renders an HTML file to PDF.
fn main() -> Result<(), PipelineError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 && args.len() != 4 {
        eprintln!("Renders an HTML file to PDF.");
        eprintln!();
        eprintln!(
            "Usage: {} <path/to/input.html> <path/to/output.pdf> [path/to/config.json]",
            args[0]
        );
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = &args[2];

    let config = match args.get(3) {
        Some(config_path) => {
            log::info!("Loading config from {}", config_path);
            RenderConfig::from_file(config_path)?
        }
        None => RenderConfig::default(),
    };

    log::info!("Reading markup from {}", input_path);
    let markup = fs::read_to_string(input_path)?;

    HtmlRenderer::new(config).render_to_file(&markup, output_path)?;
    println!("Successfully generated {}", output_path);
    Ok(())
}
