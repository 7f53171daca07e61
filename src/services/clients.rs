//! Client directory

use chrono::NaiveDateTime;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Client, ClientSummary, CreateClient},
    repository::Repository,
    services::{frequency, registrar::normalize_text},
};

#[derive(Clone)]
pub struct ClientsService {
    repository: Repository,
}

impl ClientsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Every client with last visit, visit count and frequency estimate
    pub async fn list(&self) -> AppResult<Vec<ClientSummary>> {
        let clients = self.repository.clients.list().await?;
        let mut summaries = Vec::with_capacity(clients.len());
        for client in clients {
            let history = self.repository.clients.visit_history(client.id).await?;
            let estimate = frequency::estimate(&history);
            summaries.push(ClientSummary {
                id: client.id,
                name: client.name,
                phone: client.phone,
                email: client.email,
                registered_at: client.registered_at,
                last_visit: estimate.last_visit,
                total_visits: estimate.total_visits,
                average_interval_days: estimate.average_interval_days,
                next_expected_visit: estimate.next_expected_visit,
            });
        }
        Ok(summaries)
    }

    /// Register a client ahead of their first visit
    pub async fn create(&self, mut data: CreateClient, at: NaiveDateTime) -> AppResult<Client> {
        data.validate()?;
        data.name = normalize_text(&data.name);
        if self.repository.clients.find_by_name(&data.name).await?.is_some() {
            return Err(AppError::Validation(format!("El cliente '{}' ya existe", data.name)));
        }
        let client = self.repository.clients.create(&data, at).await?;
        tracing::info!(client_id = client.id, name = %client.name, "Client created");
        Ok(client)
    }
}
