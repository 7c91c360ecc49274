//! Hen and rooster genetics, used as select options in the flock grid

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::RowId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HenGenetics {
    pub id: RowId,
    pub genetica_gallina: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HenGeneticsInput {
    #[validate(length(min = 1))]
    pub genetica_gallina: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoosterGenetics {
    pub id: RowId,
    pub nome: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RoosterGeneticsInput {
    #[validate(length(min = 1))]
    pub nome: String,
}

/// Select options for the "Razza" column, in backend order without blanks
pub fn hen_options(rows: &[HenGenetics]) -> Vec<String> {
    rows.iter()
        .map(|r| r.genetica_gallina.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Select options for the "Razza_Gallo" column
pub fn rooster_options(rows: &[RoosterGenetics]) -> Vec<String> {
    rows.iter()
        .map(|r| r.nome.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_skip_blanks() {
        let hens = vec![
            HenGenetics { id: 1, genetica_gallina: "JA87".to_string() },
            HenGenetics { id: 2, genetica_gallina: "  ".to_string() },
            HenGenetics { id: 3, genetica_gallina: " ROSS 308 ".to_string() },
        ];
        assert_eq!(hen_options(&hens), vec!["JA87", "ROSS 308"]);

        let roosters = vec![RoosterGenetics { id: 1, nome: "K".to_string() }];
        assert_eq!(rooster_options(&roosters), vec!["K"]);
    }
}
