use anyhow::{Context, Result, bail};
use cueshot_application::AnalysisService;
use cueshot_core::overlay::render_svg;
use cueshot_core::presenter::{Feedback, ResultPresenter, ResultSummary};
use cueshot_core::session::{Screen, ShotSession};
use cueshot_core::upload::UploadInput;
use cueshot_core::{CueshotError, ImageFile, ShotAnalysis, TargetGroup};
use cueshot_infrastructure::{
    ConfigResolver, DataUrlPreviewProvider, image_dimensions, load_image_file,
};
use cueshot_interaction::ShotAnalysisClient;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

/// Used when the image header cannot be read.
const FALLBACK_DIMENSIONS: (u32, u32) = (1000, 500);

pub struct AnalyzeOptions {
    pub image: PathBuf,
    pub target: TargetGroup,
    pub api_key: Option<String>,
    pub out: Option<PathBuf>,
    pub overlay: bool,
    pub json: bool,
    pub feedback: Option<Feedback>,
}

pub async fn run(options: AnalyzeOptions) -> Result<()> {
    let (config, source) = ConfigResolver::from_system()
        .resolve(options.api_key.clone())
        .context("Failed to resolve configuration")?;
    tracing::debug!(credential = %source, "Using configuration");

    let candidate = load_image_file(&options.image)
        .with_context(|| format!("Failed to open {}", options.image.display()))?;
    let file = UploadInput::new()
        .pick_files([candidate])
        .map_err(CueshotError::from)?;

    let client = ShotAnalysisClient::gemini(config).context("Failed to set up the Gemini client")?;
    let service = AnalysisService::with_preview_provider(
        Arc::new(DataUrlPreviewProvider::new()),
        Arc::new(client),
    );

    service.select_file(file.clone()).await?;
    println!(
        "Analyzing {} for {}...",
        file.name(),
        options.target.label()
    );
    service.analyze(options.target).await?;

    let session = service.session();
    let session = session.read().await;
    present(&session, &file, &options)
}

fn present(session: &ShotSession, file: &ImageFile, options: &AnalyzeOptions) -> Result<()> {
    let view = session.view();
    match view.screen {
        Screen::Result {
            preview_url,
            analysis,
        } => {
            if options.json {
                println!("{}", serde_json::to_string_pretty(analysis)?);
            } else {
                print!("{}", format_summary(&ResultSummary::from_analysis(analysis)));
            }

            let mut presenter = ResultPresenter::new();
            presenter.set_overlay_visible(options.overlay);
            if let Some(out) = &options.out {
                let document = overlay_document(&presenter, preview_url, file, analysis);
                std::fs::write(out, document)
                    .with_context(|| format!("Failed to write {}", out.display()))?;
                println!("Overlay written to {}", out.display());
            }
            if let Some(feedback) = options.feedback {
                presenter.submit_feedback(feedback);
            }
            Ok(())
        }
        _ => match view.error_banner {
            Some(message) => bail!("{message}"),
            None => bail!("Analysis did not complete (state: {:?})", view.phase()),
        },
    }
}

/// Plain-text rendering of the recommendation panel.
fn format_summary(summary: &ResultSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", summary.title);
    let _ = writeln!(out, "[{}]  {}", summary.badge, summary.confidence);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", summary.reasoning);
    out
}

fn overlay_document(
    presenter: &ResultPresenter,
    preview_url: &str,
    file: &ImageFile,
    analysis: &ShotAnalysis,
) -> String {
    let (width, height) = image_dimensions(file).unwrap_or_else(|| {
        tracing::warn!(
            "Could not read the size of {}, drawing at {}x{}",
            file.name(),
            FALLBACK_DIMENSIONS.0,
            FALLBACK_DIMENSIONS.1
        );
        FALLBACK_DIMENSIONS
    });
    let scene = presenter.scene(analysis);
    render_svg(preview_url, width, height, scene.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cueshot_core::preview::ObjectUrlPreviewProvider;
    use cueshot_core::{Coordinates, Difficulty};

    fn analysis() -> ShotAnalysis {
        ShotAnalysis {
            recommended_shot: "Stop shot on the 11".into(),
            reasoning: "Straight in, hit center.".into(),
            difficulty: Difficulty::Easy,
            cue_ball_position: Some(Coordinates::new(20.0, 50.0)),
            target_ball_position: Some(Coordinates::new(50.0, 50.0)),
            target_pocket_position: Some(Coordinates::new(100.0, 50.0)),
            confidence_score: 0.914,
        }
    }

    #[test]
    fn test_summary_lists_badge_and_confidence() {
        let text = format_summary(&ResultSummary::from_analysis(&analysis()));

        assert!(text.contains("Stop shot on the 11"));
        assert!(text.contains("[Easy Shot]  Confidence: 91%"));
        assert!(text.contains("Straight in, hit center."));
    }

    #[test]
    fn test_overlay_document_falls_back_to_default_size() {
        let file = ImageFile::new("t.jpg", "image/jpeg", b"not decodable".to_vec());
        let presenter = ResultPresenter::new();

        let svg = overlay_document(&presenter, "data:image/jpeg;base64,AA==", &file, &analysis());

        assert!(svg.contains(r#"viewBox="0 0 1000 500""#));
        assert_eq!(svg.matches("<line").count(), 2);
    }

    #[test]
    fn test_hidden_overlay_draws_image_only() {
        let file = ImageFile::new("t.jpg", "image/jpeg", b"x".to_vec());
        let mut presenter = ResultPresenter::new();
        presenter.set_overlay_visible(false);

        let svg = overlay_document(&presenter, "data:,", &file, &analysis());

        assert!(svg.contains("<image"));
        assert!(!svg.contains("<line"));
    }

    #[test]
    fn test_failed_session_reports_error_banner() {
        let mut session = ShotSession::new(Arc::new(ObjectUrlPreviewProvider::new()));
        let file = ImageFile::new("t.jpg", "image/jpeg", b"x".to_vec());
        session.select_file(file.clone()).unwrap();
        let ticket = session.select_target(TargetGroup::Solids).unwrap();
        session
            .settle(
                ticket.generation,
                Err(cueshot_core::inference::InferenceError::missing_credential()),
            )
            .unwrap();

        let options = AnalyzeOptions {
            image: PathBuf::from("t.jpg"),
            target: TargetGroup::Solids,
            api_key: None,
            out: None,
            overlay: true,
            json: false,
            feedback: None,
        };
        let err = present(&session, &file, &options).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
