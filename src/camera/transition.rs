//! Eased camera transitions with last-writer-wins semantics.
//!
//! Starting a transition bumps a generation counter and replaces whatever was
//! in flight. The replaced transition's handle stays pending forever; only the
//! newest one can complete.

use futures::channel::oneshot;
use futures::FutureExt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use super::perspective::CameraPose;
use crate::core::Countdown;
use crate::math::ease_in_out_quad;

/// Resolves once its transition has snapped the camera onto the target pose.
#[derive(Debug)]
pub struct TransitionHandle {
    generation: u64,
    finished: oneshot::Receiver<()>,
    /// `Some(true)` once finished, `Some(false)` once superseded
    outcome: Option<bool>,
}

impl TransitionHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_complete(&mut self) -> bool {
        self.settle() == Some(true)
    }

    /// A newer transition replaced this one before it finished.
    pub fn is_superseded(&mut self) -> bool {
        self.settle() == Some(false)
    }

    fn settle(&mut self) -> Option<bool> {
        if self.outcome.is_none() {
            self.outcome = match self.finished.try_recv() {
                Ok(Some(())) => Some(true),
                Ok(None) => None,
                Err(oneshot::Canceled) => Some(false),
            };
        }
        self.outcome
    }
}

impl Future for TransitionHandle {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        match this.outcome {
            Some(true) => return Poll::Ready(()),
            // Dropped sender: superseded, never resolves
            Some(false) => return Poll::Pending,
            None => {}
        }
        match this.finished.poll_unpin(cx) {
            Poll::Ready(Ok(())) => {
                this.outcome = Some(true);
                Poll::Ready(())
            }
            Poll::Ready(Err(oneshot::Canceled)) => {
                this.outcome = Some(false);
                Poll::Pending
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

#[derive(Debug)]
struct Transition {
    from: CameraPose,
    to: CameraPose,
    countdown: Countdown,
    finished: oneshot::Sender<()>,
}

/// Pose to apply after one frame of the active transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionStep {
    pub pose: CameraPose,
    pub finished: bool,
}

#[derive(Debug, Default)]
pub struct TransitionDriver {
    generation: u64,
    active: Option<Transition>,
}

impl TransitionDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts easing from `from` to `to`, superseding any transition in flight.
    pub fn start(&mut self, from: CameraPose, to: CameraPose, duration: f32) -> TransitionHandle {
        self.generation += 1;
        let generation = self.generation;
        if self.active.is_some() {
            log::debug!("Camera transition {} supersedes the one in flight", generation);
        }

        let (sender, receiver) = oneshot::channel();
        // Replacing the active transition drops its sender
        self.active = Some(Transition {
            from,
            to,
            countdown: Countdown::started(duration),
            finished: sender,
        });

        TransitionHandle {
            generation,
            finished: receiver,
            outcome: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advances the active transition by one frame. On the finishing frame the
    /// pose is exactly the target and the handle is resolved.
    pub fn advance(&mut self, delta: f32) -> Option<TransitionStep> {
        let transition = self.active.as_mut()?;

        if !transition.countdown.tick(delta) {
            let t = ease_in_out_quad(transition.countdown.progress());
            return Some(TransitionStep {
                pose: transition.from.lerp(&transition.to, t),
                finished: false,
            });
        }

        let transition = self.active.take()?;
        // The handle may already be gone; nobody is left to notify then
        let _ = transition.finished.send(());
        Some(TransitionStep {
            pose: transition.to,
            finished: true,
        })
    }
}
