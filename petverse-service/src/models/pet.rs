//! Pet model and its API projection.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A pet row as stored.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub pet_type: String,
    pub age: i64,
    pub description: String,
    pub adopted: bool,
    pub image: String,
}

impl Pet {
    /// Human-readable age, e.g. "3 years".
    pub fn display_age(&self) -> String {
        format!("{} years", self.age)
    }

    pub fn image_path(&self) -> String {
        image_path(&self.image)
    }
}

/// Public URL for a pet image filename.
pub fn image_path(image: &str) -> String {
    format!("/static/images/{}", image)
}

/// Pet as returned by `GET /api/pets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetView {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: String,
    pub age: String,
    pub description: String,
    pub image: String,
}

impl From<Pet> for PetView {
    fn from(pet: Pet) -> Self {
        let age = pet.display_age();
        let image = pet.image_path();
        Self {
            id: pet.id,
            name: pet.name,
            pet_type: pet.pet_type,
            age,
            description: pet.description,
            image,
        }
    }
}

/// Input for inserting a pet.
#[derive(Debug, Clone, Copy)]
pub struct NewPet {
    pub name: &'static str,
    pub pet_type: &'static str,
    pub age: i64,
    pub description: &'static str,
    pub image: &'static str,
}

/// Catalog inserted into an empty store at startup.
pub const SAMPLE_PETS: [NewPet; 7] = [
    NewPet {
        name: "Bruno",
        pet_type: "Dog",
        age: 3,
        description: "Friendly golden retriever",
        image: "bruno.webp",
    },
    NewPet {
        name: "Chintu",
        pet_type: "Cat",
        age: 2,
        description: "Playful tabby cat",
        image: "chintu.webp",
    },
    NewPet {
        name: "Coco",
        pet_type: "Bird",
        age: 1,
        description: "Talkative parrot",
        image: "coco.webp",
    },
    NewPet {
        name: "Rocky",
        pet_type: "Rabbit",
        age: 1,
        description: "Loves carrots",
        image: "rocky.webp",
    },
    NewPet {
        name: "Tommy",
        pet_type: "Dog",
        age: 4,
        description: "Energetic labrador",
        image: "tommy.webp",
    },
    NewPet {
        name: "Milo",
        pet_type: "Cat",
        age: 3,
        description: "Siamese cat, independent",
        image: "milo.webp",
    },
    NewPet {
        name: "Soni",
        pet_type: "Rabbit",
        age: 2,
        description: "Cuddly dwarf rabbit",
        image: "soni.webp",
    },
];
