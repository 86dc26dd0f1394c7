use mongodb::bson::{Binary, DateTime, Document, doc, spec::BinarySubtype};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::MongoDaoError;
use crate::dao::models::GameEntity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoGameDocument {
    #[serde(rename = "_id")]
    id: Binary,
    name: String,
    producer: String,
    price: f64,
    /// Keeps listing pages in insertion order.
    created_at: DateTime,
}

impl MongoGameDocument {
    pub fn new(game: GameEntity) -> Self {
        Self {
            id: uuid_as_binary(game.id),
            name: game.name,
            producer: game.producer,
            price: game.price,
            created_at: DateTime::now(),
        }
    }
}

impl TryFrom<MongoGameDocument> for GameEntity {
    type Error = MongoDaoError;

    fn try_from(value: MongoGameDocument) -> Result<Self, Self::Error> {
        let id = Uuid::from_slice(&value.id.bytes).map_err(|_| MongoDaoError::MalformedId {
            len: value.id.bytes.len(),
        })?;

        Ok(Self {
            id,
            name: value.name,
            producer: value.producer,
            price: value.price,
        })
    }
}

pub fn uuid_as_binary(id: Uuid) -> Binary {
    Binary {
        subtype: BinarySubtype::Uuid,
        bytes: id.into_bytes().to_vec(),
    }
}

pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": uuid_as_binary(id)}
}
