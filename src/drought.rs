use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{DashboardError, Result};

/// Maximum drought severity reported by the Vigieau API for a department.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DroughtLevel {
    #[default]
    None,
    Vigilance,
    Alerte,
    AlerteRenforcee,
    Crise,
    /// A level name this client does not know yet.
    Unrecognized,
}

impl DroughtLevel {
    /// Maps an API level name; `null` is [`DroughtLevel::None`].
    pub fn from_api(level: Option<&str>) -> Self {
        match level {
            None => DroughtLevel::None,
            Some("vigilance") => DroughtLevel::Vigilance,
            Some("alerte") => DroughtLevel::Alerte,
            Some("alerte_renforcee") => DroughtLevel::AlerteRenforcee,
            Some("crise") => DroughtLevel::Crise,
            Some(_) => DroughtLevel::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DroughtLevel::None => "aucune",
            DroughtLevel::Vigilance => "vigilance",
            DroughtLevel::Alerte => "alerte",
            DroughtLevel::AlerteRenforcee => "alerte_renforcee",
            DroughtLevel::Crise => "crise",
            DroughtLevel::Unrecognized => "inconnu",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            DroughtLevel::None => "Aucune restriction d'eau en vigueur actuellement.",
            DroughtLevel::Vigilance => {
                "Vigilance sécheresse en cours. Soyez attentif à votre consommation d'eau."
            }
            DroughtLevel::Alerte => "Alerte sécheresse : restrictions modérées en vigueur.",
            DroughtLevel::AlerteRenforcee => {
                "Alerte renforcée : restrictions strictes sur l'usage de l'eau."
            }
            DroughtLevel::Crise => {
                "Crise sécheresse : restrictions maximales, usage de l'eau très limité."
            }
            DroughtLevel::Unrecognized => "Niveau de restriction non reconnu.",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            DroughtLevel::None => "#2e7d32",
            DroughtLevel::Vigilance => "#fbc02d",
            DroughtLevel::Alerte => "#f57c00",
            DroughtLevel::AlerteRenforcee => "#d84315",
            DroughtLevel::Crise => "#b71c1c",
            DroughtLevel::Unrecognized => "#b38f00",
        }
    }
}

fn level_or_none<'de, D>(deserializer: D) -> std::result::Result<DroughtLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let level = Option::<String>::deserialize(deserializer)?;
    Ok(DroughtLevel::from_api(level.as_deref()))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDrought {
    pub code: String,
    #[serde(default)]
    pub nom: String,
    #[serde(default, deserialize_with = "level_or_none")]
    pub niveau_gravite_max: DroughtLevel,
    /// Surface water.
    #[serde(default, deserialize_with = "level_or_none")]
    pub niveau_gravite_sup_max: DroughtLevel,
    /// Groundwater.
    #[serde(default, deserialize_with = "level_or_none")]
    pub niveau_gravite_sou_max: DroughtLevel,
    /// Drinking water.
    #[serde(default, deserialize_with = "level_or_none")]
    pub niveau_gravite_aep_max: DroughtLevel,
}

/// Department code → maximum drought level, in API order.
#[derive(Debug, Clone, Default)]
pub struct DroughtMap {
    levels: IndexMap<String, DroughtLevel>,
}

impl DroughtMap {
    pub fn from_departments(departments: &[DepartmentDrought]) -> Self {
        Self {
            levels: departments
                .iter()
                .map(|d| (d.code.clone(), d.niveau_gravite_max))
                .collect(),
        }
    }

    pub fn level_of(&self, code: &str) -> DroughtLevel {
        self.levels.get(code).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, DroughtLevel)> {
        self.levels.iter().map(|(code, level)| (code.as_str(), *level))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Normalizes user input into a French department code (`76`, `974`, `2A`).
pub fn normalize_department_code(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DashboardError::InvalidDepartment(input.to_string()));
    }
    let code = format!("{trimmed:0>2}").to_uppercase();

    let is_numeric = (2..=3).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_digit());
    if is_numeric || code == "2A" || code == "2B" {
        Ok(code)
    } else {
        Err(DashboardError::InvalidDepartment(input.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_deserialize_with_null_levels() {
        let dep: DepartmentDrought = serde_json::from_str(
            r#"{"code": "76", "nom": "Seine-Maritime", "niveauGraviteMax": "alerte_renforcee",
                "niveauGraviteSupMax": null, "niveauGraviteSouMax": "vigilance"}"#,
        )
        .unwrap();

        assert_eq!(dep.niveau_gravite_max, DroughtLevel::AlerteRenforcee);
        assert_eq!(dep.niveau_gravite_sup_max, DroughtLevel::None);
        assert_eq!(dep.niveau_gravite_sou_max, DroughtLevel::Vigilance);
        assert_eq!(dep.niveau_gravite_aep_max, DroughtLevel::None);
        assert_eq!(dep.niveau_gravite_max.color(), "#d84315");
    }

    #[test]
    fn test_drought_map_keeps_order_and_defaults() {
        let departments: Vec<DepartmentDrought> = serde_json::from_str(
            r#"[{"code": "76", "niveauGraviteMax": "crise"},
                {"code": "01", "niveauGraviteMax": null},
                {"code": "2A", "niveauGraviteMax": "vigilance"}]"#,
        )
        .unwrap();
        let map = DroughtMap::from_departments(&departments);

        let codes: Vec<&str> = map.iter().map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["76", "01", "2A"]);
        assert_eq!(map.level_of("76"), DroughtLevel::Crise);
        assert_eq!(map.level_of("01"), DroughtLevel::None);
        assert_eq!(map.level_of("99"), DroughtLevel::None);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_normalize_department_code() {
        assert_eq!(normalize_department_code("76").unwrap(), "76");
        assert_eq!(normalize_department_code(" 1 ").unwrap(), "01");
        assert_eq!(normalize_department_code("2a").unwrap(), "2A");
        assert_eq!(normalize_department_code("974").unwrap(), "974");

        for bad in ["", "2C", "1234", "seine", "7-6"] {
            assert!(
                matches!(normalize_department_code(bad), Err(DashboardError::InvalidDepartment(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_unknown_level_keeps_the_batch() {
        let departments: Vec<DepartmentDrought> = serde_json::from_str(
            r#"[{"code": "76", "niveauGraviteMax": "crise"},
                {"code": "27", "niveauGraviteMax": "restriction_totale"}]"#,
        )
        .unwrap();
        let map = DroughtMap::from_departments(&departments);

        assert_eq!(map.len(), 2);
        assert_eq!(map.level_of("76"), DroughtLevel::Crise);
        assert_eq!(map.level_of("27"), DroughtLevel::Unrecognized);
        assert_eq!(map.level_of("27").color(), "#b38f00");
    }

    #[test]
    fn test_messages() {
        assert_eq!(DroughtLevel::None.message(), "Aucune restriction d'eau en vigueur actuellement.");
        assert!(DroughtLevel::Crise.message().starts_with("Crise sécheresse"));
        assert_eq!(DroughtLevel::AlerteRenforcee.as_str(), "alerte_renforcee");
    }
}
