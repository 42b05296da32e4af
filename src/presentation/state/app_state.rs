use std::sync::Arc;

use crate::application::ports::{FileConverter, UrlConverter};
use crate::application::services::ConversionService;
use crate::presentation::config::Settings;

pub struct AppState<F, U>
where
    F: FileConverter + ?Sized,
    U: UrlConverter + ?Sized,
{
    pub conversion_service: Arc<ConversionService<F, U>>,
    pub settings: Settings,
}

impl<F, U> AppState<F, U>
where
    F: FileConverter + ?Sized,
    U: UrlConverter + ?Sized,
{
    pub fn new(conversion_service: Arc<ConversionService<F, U>>, settings: Settings) -> Self {
        Self {
            conversion_service,
            settings,
        }
    }
}

impl<F, U> Clone for AppState<F, U>
where
    F: FileConverter + ?Sized,
    U: UrlConverter + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            conversion_service: Arc::clone(&self.conversion_service),
            settings: self.settings.clone(),
        }
    }
}
