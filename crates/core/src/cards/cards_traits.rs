use crate::cards::cards_model::{Card, NewCard};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for card repository operations
#[async_trait]
pub trait CardRepositoryTrait: Send + Sync {
    /// Get cards ordered by name; inactive cards only when asked for
    fn get_cards(&self, include_inactive: bool) -> Result<Vec<Card>>;

    /// Get a card by ID
    fn get_card_by_id(&self, id: &str) -> Result<Option<Card>>;

    /// Create a new card
    async fn create_card(&self, new_card: NewCard) -> Result<Card>;

    /// Flip the active flag
    async fn set_card_active(&self, id: &str, active: bool) -> Result<Card>;
}

/// Trait for card service operations
#[async_trait]
pub trait CardServiceTrait: Send + Sync {
    fn get_cards(&self, include_inactive: bool) -> Result<Vec<Card>>;
    fn get_card(&self, id: &str) -> Result<Option<Card>>;
    async fn create_card(&self, new_card: NewCard) -> Result<Card>;
    /// Non-destructive: the card keeps its expenses and statements
    async fn deactivate_card(&self, id: &str) -> Result<Card>;
    /// Always permitted
    async fn reactivate_card(&self, id: &str) -> Result<Card>;
}
