//! Conversions between persistence records and transfer records.
//!
//! Like-named scalar fields are copied; relationship ids are dropped going out
//! and left unset coming in.

use crate::dto::{CategoryDto, CountryDto, OwnerDto, PokemonDto, ReviewDto, ReviewerDto};
use crate::model::{Category, Country, Owner, Pokemon, Review, Reviewer};

impl From<&Category> for CategoryDto {
    fn from(c: &Category) -> Self {
        CategoryDto {
            id: c.id,
            name: c.name.clone(),
        }
    }
}

impl From<CategoryDto> for Category {
    fn from(d: CategoryDto) -> Self {
        Category { id: d.id, name: d.name }
    }
}

impl From<&Country> for CountryDto {
    fn from(c: &Country) -> Self {
        CountryDto {
            id: c.id,
            name: c.name.clone(),
        }
    }
}

impl From<CountryDto> for Country {
    fn from(d: CountryDto) -> Self {
        Country { id: d.id, name: d.name }
    }
}

impl From<&Owner> for OwnerDto {
    fn from(o: &Owner) -> Self {
        OwnerDto {
            id: o.id,
            first_name: o.first_name.clone(),
            last_name: o.last_name.clone(),
            gym: o.gym.clone(),
        }
    }
}

impl From<OwnerDto> for Owner {
    fn from(d: OwnerDto) -> Self {
        Owner {
            id: d.id,
            first_name: d.first_name,
            last_name: d.last_name,
            gym: d.gym,
            country_id: None,
        }
    }
}

impl From<&Pokemon> for PokemonDto {
    fn from(p: &Pokemon) -> Self {
        PokemonDto {
            id: p.id,
            name: p.name.clone(),
            birth_date: p.birth_date,
        }
    }
}

impl From<PokemonDto> for Pokemon {
    fn from(d: PokemonDto) -> Self {
        Pokemon {
            id: d.id,
            name: d.name,
            birth_date: d.birth_date,
        }
    }
}

impl From<&Review> for ReviewDto {
    fn from(r: &Review) -> Self {
        ReviewDto {
            id: r.id,
            title: r.title.clone(),
            text: r.text.clone(),
            rating: r.rating,
        }
    }
}

impl From<ReviewDto> for Review {
    fn from(d: ReviewDto) -> Self {
        Review {
            id: d.id,
            title: d.title,
            text: d.text,
            rating: d.rating,
            pokemon_id: None,
            reviewer_id: None,
        }
    }
}

impl From<&Reviewer> for ReviewerDto {
    fn from(r: &Reviewer) -> Self {
        ReviewerDto {
            id: r.id,
            first_name: r.first_name.clone(),
            last_name: r.last_name.clone(),
        }
    }
}

impl From<ReviewerDto> for Reviewer {
    fn from(d: ReviewerDto) -> Self {
        Reviewer {
            id: d.id,
            first_name: d.first_name,
            last_name: d.last_name,
        }
    }
}

/// Map a slice of records to transfer records.
pub fn map_all<'a, T: 'a, D: From<&'a T>>(records: &'a [T]) -> Vec<D> {
    records.iter().map(D::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn owner_round_trip_keeps_scalars_and_drops_country() {
        let owner = Owner {
            id: 9,
            first_name: "Misty".into(),
            last_name: "Waterflower".into(),
            gym: "Cerulean".into(),
            country_id: Some(2),
        };
        let back = Owner::from(OwnerDto::from(&owner));
        assert_eq!(back.id, owner.id);
        assert_eq!(back.first_name, owner.first_name);
        assert_eq!(back.last_name, owner.last_name);
        assert_eq!(back.gym, owner.gym);
        assert_eq!(back.country_id, None);
    }

    #[test]
    fn pokemon_round_trip_is_lossless() {
        let pokemon = Pokemon {
            id: 25,
            name: "Pikachu".into(),
            birth_date: NaiveDate::from_ymd_opt(1996, 2, 27)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap(),
        };
        assert_eq!(Pokemon::from(PokemonDto::from(&pokemon)), pokemon);
    }

    #[test]
    fn review_round_trip_keeps_rating() {
        let review = Review {
            id: 1,
            title: "Great".into(),
            text: "Best starter".into(),
            rating: 5,
            pokemon_id: Some(1),
            reviewer_id: Some(3),
        };
        let dto = ReviewDto::from(&review);
        assert_eq!(dto.rating, 5);
        let back = Review::from(dto);
        assert_eq!((back.id, back.title.as_str(), back.rating), (1, "Great", 5));
        assert_eq!((back.pokemon_id, back.reviewer_id), (None, None));
    }

    #[test]
    fn map_all_preserves_order() {
        let categories = vec![
            Category { id: 1, name: "Water".into() },
            Category { id: 2, name: "Fire".into() },
        ];
        let dtos: Vec<CategoryDto> = map_all(&categories);
        assert_eq!(dtos.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(Category::from(dtos[1].clone()), categories[1]);
    }
}
