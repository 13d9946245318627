use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use dishscan::{BuiltinModel, Classifier, ModelManager, ModelProvider, Prediction, RuntimeConfig};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Images to classify (JPEG or PNG)
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Number of ranked predictions to show per image
    #[arg(short = 'k', long, default_value_t = 3)]
    top_k: usize,

    /// Force a fresh download of the model file
    #[arg(short, long)]
    fresh: bool,

    /// Print predictions as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let model = BuiltinModel::Food101ResNet;
    let manager = ModelManager::new_default().context("failed to set up the model cache")?;

    if args.fresh {
        info!("Fresh download requested - removing any existing model files...");
        manager.remove_download(&model.get_model_info())?;
    }

    let start_time = Instant::now();
    let provider = ModelProvider::with_manager(
        model.get_model_info(),
        model.characteristics(),
        manager,
        RuntimeConfig::default(),
    );
    let predictor = provider
        .get()
        .await
        .context("the model is not available right now, please try again later")?;

    let classifier = Classifier::builder()
        .with_predictor(predictor, model.catalog())?
        .build()?;
    info!("Classifier ready (took {:.2?})", start_time.elapsed());

    let mut failures = 0usize;
    for path in &args.images {
        match classify_image(&classifier, path, args.top_k) {
            Ok(predictions) => {
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&predictions)?);
                } else {
                    render_predictions(path, &predictions);
                }
            }
            Err(e) => {
                warn!("{:?}: {:#}", path, e);
                eprintln!("{}: could not classify this image", path.display());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} image(s) could not be classified", failures);
    }
    Ok(())
}

fn classify_image(classifier: &Classifier, path: &Path, k: usize) -> Result<Vec<Prediction>> {
    let image = image::open(path).with_context(|| format!("failed to decode {:?}", path))?;
    let predictions = classifier.predict(&image, k)?;
    Ok(predictions)
}

fn render_predictions(path: &Path, predictions: &[Prediction]) {
    println!("{}", path.display());
    if let Some(best) = predictions.first() {
        println!(
            "  Best guess: {} ({:.1}%)",
            display_label(&best.label),
            best.score * 100.0
        );
    }
    for (rank, prediction) in predictions.iter().enumerate() {
        println!(
            "  {:>2}. {:<24} {} {:>5.1}%",
            rank + 1,
            display_label(&prediction.label),
            confidence_bar(prediction.score, 30),
            prediction.score * 100.0
        );
    }
    println!();
}

/// Turns a raw catalog label into a display name: `"fried_rice"` becomes
/// `"Fried Rice"`.
fn display_label(label: &str) -> String {
    label
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn confidence_bar(score: f32, width: usize) -> String {
    let filled = (score.clamp(0.0, 1.0) * width as f32).round() as usize;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width - filled));
    bar
}
