use contas_core::cards::{Card, CardRepositoryTrait, NewCard};
use contas_core::Result;

use super::model::CardDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::cards;
use crate::utils::now_rfc3339;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

pub struct CardRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl CardRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        CardRepository { pool, writer }
    }
}

#[async_trait]
impl CardRepositoryTrait for CardRepository {
    fn get_cards(&self, include_inactive: bool) -> Result<Vec<Card>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = cards::table.into_boxed();
        if !include_inactive {
            query = query.filter(cards::is_active.eq(true));
        }
        let rows = query
            .order(cards::name.asc())
            .load::<CardDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Card::from).collect())
    }

    fn get_card_by_id(&self, id: &str) -> Result<Option<Card>> {
        let mut conn = get_connection(&self.pool)?;
        let row = cards::table
            .find(id)
            .first::<CardDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Card::from))
    }

    async fn create_card(&self, new_card: NewCard) -> Result<Card> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Card> {
                let now = now_rfc3339();
                let row = CardDB {
                    id: new_card.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                    name: new_card.name,
                    closing_day: new_card.closing_day as i32,
                    is_active: true,
                    created_at: now.clone(),
                    updated_at: now,
                };

                let result = diesel::insert_into(cards::table)
                    .values(&row)
                    .returning(CardDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Card::from(result))
            })
            .await
    }

    async fn set_card_active(&self, id: &str, active: bool) -> Result<Card> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Card> {
                diesel::update(cards::table.find(&id_owned))
                    .set((
                        cards::is_active.eq(active),
                        cards::updated_at.eq(now_rfc3339()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let row = cards::table
                    .find(&id_owned)
                    .first::<CardDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Card::from(row))
            })
            .await
    }
}
