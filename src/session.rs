use log::warn;
use rand::rngs::StdRng;
use rand::Rng;

use crate::error::{FusionError, FusionResult};
use crate::food::{ComboGenerator, DishCombo};
use crate::image::{ImageAcquirer, ImageCycle, ImageFetcher, ImagePhase, ImageResult};

/// One front end's view of the generator: the current dish and where its
/// image stands. Every cycle takes `&mut self`, so cycles cannot overlap.
pub struct FusionSession<R = StdRng> {
    generator: ComboGenerator<R>,
    acquirer: ImageAcquirer,
    dish: Option<DishCombo>,
    cycle: ImageCycle,
}

impl<R: Rng> FusionSession<R> {
    pub fn new(generator: ComboGenerator<R>, acquirer: ImageAcquirer) -> Self {
        Self {
            generator,
            acquirer,
            dish: None,
            cycle: ImageCycle::new(),
        }
    }

    pub fn dish(&self) -> Option<&DishCombo> {
        self.dish.as_ref()
    }

    pub fn phase(&self) -> &ImagePhase {
        self.cycle.phase()
    }

    pub fn image(&self) -> Option<&ImageResult> {
        self.cycle.image()
    }

    pub fn acquirer(&self) -> &ImageAcquirer {
        &self.acquirer
    }

    /// Replaces the current dish without requesting an image.
    pub fn next_dish_text(&mut self) -> &DishCombo {
        self.cycle.reset();
        self.dish.insert(self.generator.generate())
    }

    /// Full cycle: new dish, then its image (primary, else fallback). The dish
    /// id is the image seed.
    pub async fn next_dish(&mut self) -> FusionResult<(&DishCombo, &ImageResult)> {
        self.cycle.reset();
        let dish = self.generator.generate();
        let prompt = self.acquirer.full_prompt(&dish.description);
        let seed = dish.id;
        self.dish = Some(dish);

        self.cycle.begin()?;
        match self.acquirer.request_primary(&prompt, seed).await {
            Ok(image) => self.cycle.primary_succeeded(image)?,
            Err(failure) => {
                let reason = failure.to_string();
                self.cycle.primary_failed(reason.clone())?;
                let image = self.acquirer.fallback(&prompt, seed, Some(reason));
                self.cycle.fallback_ready(image)?;
            }
        }

        match (self.dish.as_ref(), self.cycle.image()) {
            (Some(dish), Some(image)) => Ok((dish, image)),
            _ => Err(self.not_ready("finish a cycle")),
        }
    }

    /// Load-error signal from whatever displays the image. Returns the
    /// fallback image when one is still available, `ImageTotalFailure` when
    /// the fallback itself failed.
    pub fn report_load_error(&mut self, reason: &str) -> FusionResult<&ImageResult> {
        let (prompt, seed) = match self.cycle.image() {
            Some(image) => (image.prompt.clone(), image.seed),
            None => return Err(self.not_ready("report a load error")),
        };

        if let Err(e) = self.cycle.load_failed(reason) {
            warn!("{}", e);
            return Err(e);
        }

        let image = self.acquirer.fallback(&prompt, seed, Some(reason.to_string()));
        self.cycle.fallback_ready(image)?;
        match self.cycle.image() {
            Some(image) => Ok(image),
            None => Err(self.not_ready("recover with the fallback")),
        }
    }

    /// Downloads the current image, feeding any failure back into the cycle
    /// so a dead primary URL gets its one fallback attempt.
    pub async fn download_image(&mut self, fetcher: &ImageFetcher) -> FusionResult<Vec<u8>> {
        loop {
            let url = match self.cycle.image() {
                Some(image) => image.url.clone(),
                None => return Err(self.not_ready("download an image")),
            };
            match fetcher.download(&url).await {
                Ok(bytes) => return Ok(bytes),
                Err(e) => {
                    self.report_load_error(&e.to_string())?;
                }
            }
        }
    }

    fn not_ready(&self, event: &'static str) -> FusionError {
        FusionError::InvalidTransition {
            from: self.cycle.phase().label().to_string(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FallbackConfig;
    use crate::food::Pools;
    use crate::image::acquire::tests::StubProvider;
    use crate::image::ImageSource;
    use crate::providers::pollinations::pollinations::FallbackUrlBuilder;
    use crate::test_support::serve;
    use axum::{http::header, routing::get, Router};

    fn session(primary: StubProvider, fallback: FallbackUrlBuilder) -> FusionSession {
        let generator = ComboGenerator::seeded(Pools::builtin(), 99).unwrap();
        FusionSession::new(generator, ImageAcquirer::new(Box::new(primary), fallback, "vibrant"))
    }

    #[tokio::test]
    async fn test_cycle_with_primary() {
        let mut session = session(StubProvider::answering("https://cdn.example/a.png"), FallbackUrlBuilder::default());
        let (dish, image) = session.next_dish().await.unwrap();
        assert_eq!(image.source, ImageSource::Primary);
        assert_eq!(image.seed, dish.id);
        assert_eq!(image.prompt, format!("{}, vibrant", dish.description));
        assert_eq!(session.phase().label(), "ready");
    }

    #[tokio::test]
    async fn test_cycle_with_fallback_uses_dish_seed() {
        let mut session = session(StubProvider::failing(), FallbackUrlBuilder::default());
        let (dish, image) = session.next_dish().await.unwrap();
        assert_eq!(image.source, ImageSource::Fallback);
        assert!(image.url.contains(&format!("seed={}", dish.id)));
        assert!(image.url.contains(&urlencoding::encode(&dish.description).into_owned()));
    }

    #[tokio::test]
    async fn test_new_cycle_replaces_dish() {
        let mut session = session(StubProvider::failing(), FallbackUrlBuilder::default());
        let first = session.next_dish().await.unwrap().0.clone();
        let second = session.next_dish_text().clone();
        assert_eq!(session.dish(), Some(&second));
        assert_ne!(first.id, second.id);
        assert_eq!(session.phase(), &ImagePhase::Idle);
        assert!(session.image().is_none());
    }

    #[tokio::test]
    async fn test_load_error_before_any_image_is_rejected() {
        let mut session = session(StubProvider::failing(), FallbackUrlBuilder::default());
        assert!(matches!(
            session.report_load_error("nothing to load"),
            Err(FusionError::InvalidTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_fallback_load_error_is_total_failure() {
        let mut session = session(StubProvider::failing(), FallbackUrlBuilder::default());
        session.next_dish().await.unwrap();
        let err = session.report_load_error("HTTP 502").unwrap_err();
        assert!(matches!(err, FusionError::ImageTotalFailure(_)));
        assert!(matches!(session.phase(), ImagePhase::Failed { .. }));
    }

    fn local_fallback(base: &str, route: &str) -> FallbackUrlBuilder {
        FallbackUrlBuilder::new(FallbackConfig {
            base: format!("{}/{}", base, route),
            ..FallbackConfig::default()
        })
    }

    fn image_server() -> Router {
        Router::new().route(
            "/good/:prompt",
            get(|| async { ([(header::CONTENT_TYPE, "image/jpeg")], vec![0xFFu8, 0xD8, 0xFF]) }),
        )
    }

    #[tokio::test]
    async fn test_download_recovers_from_dead_primary_url() {
        let base = serve(image_server()).await;
        let primary = StubProvider::answering(&format!("{}/expired.png", base));
        let mut session = session(primary, local_fallback(&base, "good"));

        session.next_dish().await.unwrap();
        let bytes = session.download_image(&ImageFetcher::default()).await.unwrap();
        assert_eq!(bytes, vec![0xFFu8, 0xD8, 0xFF]);
        assert_eq!(session.image().map(|i| i.source), Some(ImageSource::Fallback));
    }

    #[tokio::test]
    async fn test_download_total_failure() {
        let base = serve(image_server()).await;
        let mut session = session(StubProvider::failing(), local_fallback(&base, "gone"));

        session.next_dish().await.unwrap();
        let err = session.download_image(&ImageFetcher::default()).await.unwrap_err();
        assert!(matches!(err, FusionError::ImageTotalFailure(_)));
        assert!(matches!(session.phase(), ImagePhase::Failed { .. }));
    }
}
