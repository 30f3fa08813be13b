//! Backend worker: owns the tokio runtime and all network traffic. Commands
//! are drained sequentially, so at most one request is in flight at a time.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use reqwest::Client as HttpClient;

use cinenote_core::fetch_random_movie;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{PosterImage, UiEvent};

const STARTUP_FAILURE_MESSAGE: &str =
    "Le service réseau n'a pas pu démarrer, merci de relancer l'application.";

pub fn spawn_backend_worker(
    api_base_url: String,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::WorkerStartupFailed {
                    message: STARTUP_FAILURE_MESSAGE.to_string(),
                });
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let http = HttpClient::new();

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::LoadMovie => {
                        tracing::info!("backend: load_movie");
                        match fetch_random_movie(&http, &api_base_url).await {
                            Ok(movie) => {
                                let _ = ui_tx.try_send(UiEvent::MovieLoaded(movie));
                            }
                            Err(err) => {
                                tracing::error!("backend: load_movie failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::MovieLoadFailed {
                                    message: err.user_message(),
                                });
                            }
                        }
                    }
                    BackendCommand::FetchPoster { url } => {
                        tracing::info!(%url, "backend: fetch_poster");
                        match download_poster(&http, &url).await {
                            Ok(bytes) => match decode_poster_image(&bytes) {
                                Ok(image) => {
                                    let _ = ui_tx.try_send(UiEvent::PosterLoaded(image));
                                }
                                Err(reason) => {
                                    let _ = ui_tx.try_send(UiEvent::PosterLoadFailed { reason });
                                }
                            },
                            Err(err) => {
                                let _ = ui_tx.try_send(UiEvent::PosterLoadFailed {
                                    reason: format!("failed to download poster: {err}"),
                                });
                            }
                        }
                    }
                }
            }
        });
    });
}

async fn download_poster(http: &HttpClient, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let response = http.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

fn decode_poster_image(bytes: &[u8]) -> Result<PosterImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let resized = dynamic.thumbnail(1024, 1024).to_rgba8();
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(PosterImage {
        width,
        height,
        rgba: resized.into_raw(),
    })
}
