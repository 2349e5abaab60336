//! Playback/live session lifecycle for one rendering surface
//!
//! At most one player handle exists per manager. Every identity change tears
//! the current handle down before the replacement URL is even requested, and
//! a generation counter discards resolutions that were overtaken by a newer
//! `apply` or `stop`.

use parking_lot::Mutex;

use super::player::{Player, PlayerConfig};
use crate::config::TemplatesConfig;
use crate::error::SessionError;
use crate::models::{Credential, PlaybackMode, SessionState, SessionSummary, SessionTarget};
use crate::service::StreamResolver;

/// Result of [`SessionManager::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// A new handle was created
    Started(SessionSummary),
    /// The requested identity is already active
    Unchanged(SessionSummary),
    /// A newer request took over while the address was being resolved
    Superseded,
    /// Credential or target missing; nothing is playing
    Idle,
}

struct PlaybackSession<H> {
    summary: SessionSummary,
    target: SessionTarget,
    handle: H,
}

struct Inner<H> {
    generation: u64,
    state: SessionState,
    session: Option<PlaybackSession<H>>,
}

/// Owns the session bound to one surface
pub struct SessionManager<P: Player> {
    surface_id: String,
    resolver: StreamResolver,
    templates: TemplatesConfig,
    player: P,
    inner: Mutex<Inner<P::Handle>>,
}

impl<P: Player> std::fmt::Debug for SessionManager<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("SessionManager")
            .field("surface_id", &self.surface_id)
            .field("state", &inner.state)
            .field("generation", &inner.generation)
            .finish_non_exhaustive()
    }
}

impl<P: Player> SessionManager<P> {
    pub fn new(
        surface_id: impl Into<String>,
        resolver: StreamResolver,
        templates: TemplatesConfig,
        player: P,
    ) -> Self {
        Self {
            surface_id: surface_id.into(),
            resolver,
            templates,
            player,
            inner: Mutex::new(Inner {
                generation: 0,
                state: SessionState::Idle,
                session: None,
            }),
        }
    }

    #[must_use]
    pub fn surface_id(&self) -> &str {
        &self.surface_id
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner.lock().state
    }

    /// Summary of the active session, if any
    #[must_use]
    pub fn current(&self) -> Option<SessionSummary> {
        self.inner.lock().session.as_ref().map(|s| s.summary.clone())
    }

    /// Bring the surface in line with the given credential and target.
    ///
    /// Either input missing stops playback. The same identity as the active
    /// session is a no-op. Anything else replaces the session: the old handle
    /// is destroyed before the new address is requested.
    pub async fn apply(
        &self,
        credential: Option<&Credential>,
        target: Option<&SessionTarget>,
    ) -> Result<SessionOutcome, SessionError> {
        let (Some(credential), Some(target)) = (credential, target) else {
            self.stop();
            return Ok(SessionOutcome::Idle);
        };

        if target.mode == PlaybackMode::Playback && target.recording.is_none() {
            self.stop();
            return Err(SessionError::MissingRecording);
        }

        let generation = {
            let mut inner = self.inner.lock();
            if inner.state == SessionState::Active {
                if let Some(session) = &inner.session {
                    if session.target.same_identity(target) {
                        return Ok(SessionOutcome::Unchanged(session.summary.clone()));
                    }
                }
            }

            inner.generation += 1;
            self.teardown(&mut inner);
            inner.state = SessionState::Resolving;
            inner.generation
        };

        tracing::debug!(
            surface = %self.surface_id,
            camera = %target.camera_id,
            channel = target.channel,
            generation,
            "Resolving stream address"
        );

        let resolved = self.resolver.resolve(credential, target).await;

        let mut inner = self.inner.lock();
        if inner.generation != generation {
            tracing::debug!(
                surface = %self.surface_id,
                stale = generation,
                current = inner.generation,
                "Discarding superseded stream address"
            );
            return Ok(SessionOutcome::Superseded);
        }

        let stream_url = match resolved {
            Ok(url) => url,
            Err(e) => {
                inner.state = SessionState::Idle;
                tracing::warn!(surface = %self.surface_id, error = %e, "Stream address resolution failed");
                return Err(e);
            }
        };

        let template = self.templates.select(target.viewer_class, target.mode).to_string();
        let config = PlayerConfig {
            surface_id: self.surface_id.clone(),
            stream_url,
            template,
            access_token: credential.token().to_string(),
        };

        let handle = match self.player.create(&config) {
            Ok(handle) => handle,
            Err(e) => {
                inner.state = SessionState::Idle;
                tracing::warn!(surface = %self.surface_id, error = %e, "Player creation failed");
                return Err(SessionError::HandleConstruction(e.to_string()));
            }
        };

        let summary = SessionSummary {
            id: nanoid::nanoid!(12),
            camera_id: target.camera_id.clone(),
            channel: target.channel,
            mode: target.mode,
            viewer_class: target.viewer_class,
            stream_url: config.stream_url,
            template: config.template,
        };

        tracing::info!(
            surface = %self.surface_id,
            session_id = %summary.id,
            camera = %summary.camera_id,
            channel = summary.channel,
            template = %summary.template,
            "Session started"
        );

        inner.session = Some(PlaybackSession {
            summary: summary.clone(),
            target: target.clone(),
            handle,
        });
        inner.state = SessionState::Active;

        Ok(SessionOutcome::Started(summary))
    }

    /// Tear down the active session and invalidate in-flight resolutions
    pub fn stop(&self) {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        self.teardown(&mut inner);
        inner.state = SessionState::Idle;
    }

    fn teardown(&self, inner: &mut Inner<P::Handle>) {
        if let Some(session) = inner.session.take() {
            inner.state = SessionState::Replacing;
            tracing::info!(
                surface = %self.surface_id,
                session_id = %session.summary.id,
                "Tearing down session"
            );
            self.player.destroy(session.handle);
        }
    }
}

impl<P: Player> Drop for SessionManager<P> {
    fn drop(&mut self) {
        if let Some(session) = self.inner.get_mut().session.take() {
            tracing::debug!(surface = %self.surface_id, session_id = %session.summary.id, "Releasing session on drop");
            self.player.destroy(session.handle);
        }
    }
}
