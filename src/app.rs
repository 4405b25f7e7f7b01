use crate::animator::Animator;
use crate::config::Config;
use crate::display::DisplaySink;
use crate::errors::AppError;
use crate::poller::Poller;
use crate::source::HttpSource;
use std::sync::Arc;

pub fn build_poller<D: DisplaySink>(
    config: Config,
    display: Arc<D>,
) -> Result<Poller<HttpSource, D>, AppError> {
    let source = HttpSource::new(config.stats_url.clone(), config.request_timeout())?;
    let animator = Arc::new(Animator::new(display));
    Ok(Poller::new(source, animator, config))
}
