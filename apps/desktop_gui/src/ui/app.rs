//! The CinéNote window: one view stacking the movie card over the comment
//! panel, driven by the loader and poster state machines plus the owned
//! comment store.

use chrono::Local;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use cinenote_core::{
    validate, Comment, CommentDraft, CommentId, CommentStore, FieldErrors, MovieCard,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{PosterImage, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

const BUSY_LABEL: &str = "Chargement du film...";
const POSTER_BUSY_LABEL: &str = "Chargement de l'affiche...";
const POSTER_UNAVAILABLE_LABEL: &str = "Affiche indisponible";
const RELEASE_DATE_PREFIX: &str = "Sortie le";
const VOTE_PREFIX: &str = "Note moyenne :";
const COMMENTS_HEADING: &str = "Commentaires";
const COMMENT_FIELD_LABEL: &str = "Votre commentaire";
const COMMENT_FIELD_HINT: &str = "Votre avis sur le film";
const NOTE_FIELD_LABEL: &str = "Note (1 à 5)";
const ACCEPT_CONDITIONS_LABEL: &str = "J'accepte les conditions générales";
const SUBMIT_LABEL: &str = "Envoyer";
const DELETE_LABEL: &str = "Supprimer";
const NO_COMMENTS_PLACEHOLDER: &str = "Aucun commentaire pour le moment !";

#[derive(Clone)]
enum MovieLoadState {
    Loading,
    Ready(MovieCard),
    Failed(String),
}

enum PosterState {
    NotRequested,
    Loading,
    Ready {
        image: PosterImage,
        texture: Option<egui::TextureHandle>,
    },
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

#[derive(Default)]
struct CommentFormState {
    comment: String,
    note: String,
    accept_conditions: bool,
    errors: FieldErrors,
}

impl CommentFormState {
    fn clear(&mut self) {
        *self = Self::default();
    }
}

pub struct CineNoteApp {
    movie_load: MovieLoadState,
    poster: PosterState,
    store: CommentStore,
    form: CommentFormState,
    status_banner: Option<StatusBanner>,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
}

impl CineNoteApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            movie_load: MovieLoadState::Loading,
            poster: PosterState::NotRequested,
            store: CommentStore::new(),
            form: CommentFormState::default(),
            status_banner: None,
            cmd_tx,
            ui_rx,
        };
        // The fetch fires once per app lifetime, here and not per frame.
        app.dispatch(BackendCommand::LoadMovie);
        app
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        if let Err(message) = dispatch_backend_command(&self.cmd_tx, cmd) {
            self.status_banner = Some(StatusBanner {
                severity: StatusBannerSeverity::Error,
                message,
            });
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::MovieLoaded(movie) => {
                    let card = MovieCard::from_movie(&movie);
                    self.poster = PosterState::Loading;
                    self.dispatch(BackendCommand::FetchPoster {
                        url: card.poster_url.clone(),
                    });
                    self.movie_load = MovieLoadState::Ready(card);
                }
                UiEvent::MovieLoadFailed { message } => {
                    self.movie_load = MovieLoadState::Failed(message);
                }
                UiEvent::PosterLoaded(image) => {
                    self.poster = PosterState::Ready {
                        image,
                        texture: None,
                    };
                }
                UiEvent::PosterLoadFailed { reason } => {
                    tracing::warn!("poster unavailable: {reason}");
                    self.poster = PosterState::Failed(reason);
                }
                UiEvent::WorkerStartupFailed { message } => {
                    self.status_banner = Some(StatusBanner {
                        severity: StatusBannerSeverity::Error,
                        message,
                    });
                }
            }
        }
    }

    fn submit_comment(&mut self) {
        let draft = CommentDraft {
            comment: self.form.comment.clone(),
            note: self.form.note.clone(),
            accept_conditions: self.form.accept_conditions,
        };
        match validate(&draft) {
            Ok(validated) => {
                self.store.add_comment(Comment::new(validated, Local::now()));
                self.form.clear();
            }
            Err(errors) => self.form.errors = errors,
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Fermer").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(8.0);
        }
    }

    fn show_busy_indicator(&self, ui: &mut egui::Ui) {
        ui.add_space(ui.available_height() * 0.35);
        ui.vertical_centered(|ui| {
            ui.spinner();
            ui.add_space(8.0);
            ui.label(egui::RichText::new(BUSY_LABEL).weak());
        });
    }

    /// Blocking failure view: the banner is the whole screen content.
    fn show_fetch_error(&self, ui: &mut egui::Ui, message: &str) {
        ui.add_space(24.0);
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(12, 10))
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new(message)
                        .color(egui::Color32::WHITE)
                        .strong(),
                );
            });
    }

    fn show_movie_card(&mut self, ui: &mut egui::Ui, card: &MovieCard) {
        self.show_poster(ui);
        ui.add_space(8.0);
        ui.heading(&card.title);
        ui.label(
            egui::RichText::new(format!("{RELEASE_DATE_PREFIX} {}", card.release_date)).weak(),
        );
        ui.add_space(6.0);
        ui.label(&card.overview);
        ui.add_space(6.0);
        ui.label(egui::RichText::new(format!("{VOTE_PREFIX} {}", card.vote_summary)).strong());
    }

    fn show_poster(&mut self, ui: &mut egui::Ui) {
        match &mut self.poster {
            PosterState::NotRequested => {}
            PosterState::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(egui::RichText::new(POSTER_BUSY_LABEL).weak());
                });
            }
            PosterState::Failed(reason) => {
                ui.label(egui::RichText::new(POSTER_UNAVAILABLE_LABEL).weak())
                    .on_hover_text(reason.as_str());
            }
            PosterState::Ready { image, texture } => {
                if texture.is_none() {
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(
                        [image.width, image.height],
                        &image.rgba,
                    );
                    *texture = Some(ui.ctx().load_texture(
                        "movie_poster",
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ));
                }

                if let Some(texture) = texture.as_ref() {
                    let mut size = texture.size_vec2();
                    let max_width = (ui.available_width() * 0.6).clamp(160.0, 320.0);
                    if size.x > max_width {
                        size *= max_width / size.x;
                    }
                    if size.y > 420.0 {
                        size *= 420.0 / size.y;
                    }
                    ui.add(egui::Image::new(texture).fit_to_exact_size(size));
                }
            }
        }
    }

    fn show_comment_section(&mut self, ui: &mut egui::Ui) {
        ui.heading(COMMENTS_HEADING);
        ui.add_space(6.0);
        self.show_comment_form(ui);
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(6.0);
        self.show_comment_list(ui);
    }

    fn field_error(ui: &mut egui::Ui, message: Option<&'static str>) {
        if let Some(message) = message {
            ui.colored_label(ui.visuals().error_fg_color, message);
        }
    }

    fn show_comment_form(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new(COMMENT_FIELD_LABEL).strong());
        ui.add(
            egui::TextEdit::multiline(&mut self.form.comment)
                .id_salt("comment_text")
                .desired_rows(3)
                .desired_width(f32::INFINITY)
                .hint_text(COMMENT_FIELD_HINT),
        );
        Self::field_error(ui, self.form.errors.comment);

        ui.add_space(6.0);
        ui.label(egui::RichText::new(NOTE_FIELD_LABEL).strong());
        ui.add(
            egui::TextEdit::singleline(&mut self.form.note)
                .id_salt("comment_note")
                .desired_width(80.0)
                .hint_text("5"),
        );
        Self::field_error(ui, self.form.errors.note);

        ui.add_space(6.0);
        ui.checkbox(&mut self.form.accept_conditions, ACCEPT_CONDITIONS_LABEL);
        Self::field_error(ui, self.form.errors.accept_conditions);

        ui.add_space(8.0);
        // Always enabled; an invalid draft comes back with inline messages.
        if ui.button(SUBMIT_LABEL).clicked() {
            self.submit_comment();
        }
    }

    fn show_comment_list(&mut self, ui: &mut egui::Ui) {
        if self.store.is_empty() {
            ui.label(egui::RichText::new(NO_COMMENTS_PLACEHOLDER).weak());
            return;
        }

        let mut pending_delete: Option<CommentId> = None;
        for comment in self.store.comments() {
            egui::Frame::NONE
                .fill(ui.visuals().faint_bg_color)
                .corner_radius(6.0)
                .inner_margin(egui::Margin::symmetric(8, 6))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(format!("★ {}/5", comment.rating)).strong());
                        ui.label(egui::RichText::new(format!("le {}", comment.posted_at)).weak());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button(DELETE_LABEL).clicked() {
                                pending_delete = Some(comment.id);
                            }
                        });
                    });
                    ui.label(&comment.text);
                });
            ui.add_space(4.0);
        }

        if let Some(id) = pending_delete {
            self.store.delete_comment(id);
        }
    }
}

impl eframe::App for CineNoteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.show_status_banner(ui);

                    match self.movie_load.clone() {
                        MovieLoadState::Loading => self.show_busy_indicator(ui),
                        MovieLoadState::Failed(message) => self.show_fetch_error(ui, &message),
                        MovieLoadState::Ready(card) => {
                            self.show_movie_card(ui, &card);
                            ui.add_space(12.0);
                            ui.separator();
                            ui.add_space(8.0);
                            self.show_comment_section(ui);
                        }
                    }
                });
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinenote_core::Movie;
    use crossbeam_channel::bounded;

    fn app_with_queues() -> (
        CineNoteApp,
        crossbeam_channel::Receiver<BackendCommand>,
        crossbeam_channel::Sender<UiEvent>,
    ) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        (CineNoteApp::new(cmd_tx, ui_rx), cmd_rx, ui_tx)
    }

    fn test_movie() -> Movie {
        Movie {
            poster_path: "/x.jpg".to_string(),
            original_title: "Test Movie".to_string(),
            release_date: "2020-01-15".to_string(),
            overview: "Un film de test.".to_string(),
            vote_average: 7.5,
            vote_count: 100,
        }
    }

    #[test]
    fn queues_exactly_one_movie_load_on_construction() {
        let (app, cmd_rx, _ui_tx) = app_with_queues();

        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::LoadMovie)));
        assert!(cmd_rx.try_recv().is_err());
        assert!(app.status_banner.is_none());
    }

    #[test]
    fn successful_load_projects_the_card_and_requests_the_poster() {
        let (mut app, cmd_rx, ui_tx) = app_with_queues();
        let _ = cmd_rx.try_recv();

        ui_tx
            .try_send(UiEvent::MovieLoaded(test_movie()))
            .expect("queue event");
        app.process_ui_events();

        match &app.movie_load {
            MovieLoadState::Ready(card) => {
                assert_eq!(card.title, "Test Movie");
                assert!(card.poster_url.ends_with("/x.jpg"));
            }
            _ => panic!("expected the card to be ready"),
        }
        assert!(matches!(
            cmd_rx.try_recv(),
            Ok(BackendCommand::FetchPoster { .. })
        ));
        assert!(matches!(app.poster, PosterState::Loading));
    }

    #[test]
    fn failed_load_keeps_only_the_error_message() {
        let (mut app, _cmd_rx, ui_tx) = app_with_queues();

        ui_tx
            .try_send(UiEvent::MovieLoadFailed {
                message: "Erreur 500 : Internal error".to_string(),
            })
            .expect("queue event");
        app.process_ui_events();

        match &app.movie_load {
            MovieLoadState::Failed(message) => assert!(message.contains("500")),
            _ => panic!("expected the failed state"),
        }
        assert!(matches!(app.poster, PosterState::NotRequested));
    }

    #[test]
    fn valid_submission_appends_to_the_list_and_resets_the_form() {
        let (mut app, _cmd_rx, _ui_tx) = app_with_queues();
        app.form.comment = "Great film".to_string();
        app.form.note = "4".to_string();
        app.form.accept_conditions = true;

        app.submit_comment();

        let comments = app.store.comments();
        assert_eq!(comments.len(), 1);
        assert_eq!(
            comments.last().map(|c| (c.text.as_str(), c.rating)),
            Some(("Great film", 4))
        );
        assert!(app.form.comment.is_empty());
        assert!(app.form.note.is_empty());
        assert!(!app.form.accept_conditions);
        assert!(app.form.errors.is_empty());
    }

    #[test]
    fn refused_conditions_reject_the_submission_with_one_inline_error() {
        let (mut app, _cmd_rx, _ui_tx) = app_with_queues();
        app.form.comment = "Great film".to_string();
        app.form.note = "4".to_string();
        app.form.accept_conditions = false;

        app.submit_comment();

        assert!(app.store.is_empty());
        assert!(app.form.errors.comment.is_none());
        assert!(app.form.errors.note.is_none());
        assert!(app.form.errors.accept_conditions.is_some());
        // The draft stays editable exactly as typed.
        assert_eq!(app.form.comment, "Great film");
    }

    #[test]
    fn deleting_from_the_list_only_touches_the_matching_comment() {
        let (mut app, _cmd_rx, _ui_tx) = app_with_queues();
        app.form.comment = "Premier avis".to_string();
        app.form.note = "5".to_string();
        app.form.accept_conditions = true;
        app.submit_comment();

        let id = app.store.comments()[0].id;
        app.store.delete_comment(id);

        assert!(app.store.is_empty());
    }
}
