use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use super::{Action, AppState, Applied, Completion, Outcome, RecipeTicket, SearchTicket};
use crate::error::AppError;
use crate::providers::RecipeProvider;

/// Drives an [`AppState`]: dispatches actions, runs provider loads as
/// background tasks and applies their results in arrival order.
pub struct Controller {
    state: AppState,
    provider: Arc<dyn RecipeProvider>,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl Controller {
    pub fn new(state: AppState, provider: Arc<dyn RecipeProvider>) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            state,
            provider,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Number of loads whose results have not been applied yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Dispatch an action, starting a background load when it opens a new
    /// search or recipe
    pub async fn handle(&mut self, action: Action) -> Result<Outcome, AppError> {
        let outcome = self.state.dispatch(action).await?;
        match &outcome {
            Outcome::SearchStarted(ticket) => self.spawn_search(ticket.clone()),
            Outcome::RecipeStarted(ticket) => self.spawn_recipe(ticket.clone()),
            _ => {}
        }
        Ok(outcome)
    }

    fn spawn_search(&mut self, ticket: SearchTicket) {
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = provider.search(&ticket.query).await;
            // Receiver only goes away with the controller
            let _ = tx.send(Completion::SearchLoaded {
                generation: ticket.generation,
                result,
            });
        });
    }

    fn spawn_recipe(&mut self, ticket: RecipeTicket) {
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = provider.fetch_recipe(&ticket.id).await;
            let _ = tx.send(Completion::RecipeLoaded {
                generation: ticket.generation,
                result,
            });
        });
    }

    /// Wait for the next load to finish and apply it.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<Result<Applied, AppError>> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.rx.recv().await?;
        self.in_flight -= 1;
        debug!("Completion for generation {}", completion.generation());
        Some(self.state.apply(completion))
    }

    /// Apply every outstanding load
    pub async fn settle(&mut self) -> Vec<Result<Applied, AppError>> {
        let mut applied = Vec::new();
        while let Some(result) = self.next_completion().await {
            applied.push(result);
        }
        applied
    }
}
