use crate::cards::cards_model::{Card, NewCard};
use crate::cards::cards_traits::{CardRepositoryTrait, CardServiceTrait};
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use async_trait::async_trait;
use std::sync::Arc;

pub struct CardService {
    card_repo: Arc<dyn CardRepositoryTrait>,
}

impl CardService {
    pub fn new(card_repo: Arc<dyn CardRepositoryTrait>) -> Self {
        CardService { card_repo }
    }

    async fn set_active(&self, id: &str, active: bool) -> Result<Card> {
        if self.card_repo.get_card_by_id(id)?.is_none() {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Card '{}' not found",
                id
            ))));
        }
        self.card_repo.set_card_active(id, active).await
    }
}

#[async_trait]
impl CardServiceTrait for CardService {
    fn get_cards(&self, include_inactive: bool) -> Result<Vec<Card>> {
        self.card_repo.get_cards(include_inactive)
    }

    fn get_card(&self, id: &str) -> Result<Option<Card>> {
        self.card_repo.get_card_by_id(id)
    }

    async fn create_card(&self, new_card: NewCard) -> Result<Card> {
        let name = new_card.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if !(1..=31).contains(&new_card.closing_day) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "closing day must be between 1 and 31, got {}",
                new_card.closing_day
            ))));
        }
        self.card_repo
            .create_card(NewCard {
                id: new_card.id,
                name,
                closing_day: new_card.closing_day,
            })
            .await
    }

    async fn deactivate_card(&self, id: &str) -> Result<Card> {
        self.set_active(id, false).await
    }

    async fn reactivate_card(&self, id: &str) -> Result<Card> {
        self.set_active(id, true).await
    }
}
