//! The six wisdom cards, one bound to each face.
//!
//! The catalogue is read-only once built. The JSON form uses camelCase field
//! names (`codeSnippet`, `iconName`) and may list entries in any order; they
//! are stored in face order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::face::Face;

pub const CURRENT_VERSION: &str = "1";

const DEFAULT_GRADIENT: &str = "from-slate-300 via-slate-100 to-slate-50";

/// Content shown on one face and in the detail panel when it settles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wisdom {
    pub id: u32,
    pub face: Face,
    pub title: String,
    pub summary: String,
    pub detail: String,
    pub code_snippet: String,
    pub color: String,
    pub icon_name: String,
}

impl Wisdom {
    /// Page background gradient matching this card's color class.
    pub fn background_gradient(&self) -> &'static str {
        match self.color.as_str() {
            "bg-blue-600" => "from-blue-300 via-blue-100 to-slate-50",
            "bg-rose-600" => "from-rose-300 via-rose-100 to-slate-50",
            "bg-emerald-600" => "from-emerald-300 via-emerald-100 to-slate-50",
            "bg-purple-600" => "from-purple-300 via-purple-100 to-slate-50",
            "bg-amber-600" => "from-amber-300 via-amber-100 to-slate-50",
            "bg-cyan-600" => "from-cyan-300 via-cyan-100 to-slate-50",
            _ => DEFAULT_GRADIENT,
        }
    }
}

/// Background gradient when no wisdom is active.
pub fn default_gradient() -> &'static str {
    DEFAULT_GRADIENT
}

#[derive(Debug)]
pub enum CatalogueError {
    DuplicateFace(Face),
    MissingFace(Face),
    Json(serde_json::Error),
}

impl fmt::Display for CatalogueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogueError::DuplicateFace(face) => write!(f, "face '{face}' has more than one entry"),
            CatalogueError::MissingFace(face) => write!(f, "face '{face}' has no entry"),
            CatalogueError::Json(e) => write!(f, "invalid catalogue JSON: {e}"),
        }
    }
}

impl std::error::Error for CatalogueError {}

impl From<serde_json::Error> for CatalogueError {
    fn from(e: serde_json::Error) -> Self {
        CatalogueError::Json(e)
    }
}

/// Exactly one [`Wisdom`] per [`Face`], stored in face order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalogue {
    entries: Vec<Wisdom>,
}

#[derive(Serialize, Deserialize)]
struct WireCatalogue {
    version: String,
    wisdoms: Vec<Wisdom>,
}

impl Catalogue {
    /// Validate and order a list of entries: every face exactly once.
    pub fn from_entries(entries: Vec<Wisdom>) -> Result<Self, CatalogueError> {
        let mut slots: [Option<Wisdom>; 6] = Default::default();
        for wisdom in entries {
            let slot = &mut slots[wisdom.face.index()];
            if slot.is_some() {
                return Err(CatalogueError::DuplicateFace(wisdom.face));
            }
            *slot = Some(wisdom);
        }

        let entries = Face::ALL
            .into_iter()
            .zip(slots)
            .map(|(face, slot)| slot.ok_or(CatalogueError::MissingFace(face)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn get(&self, face: Face) -> &Wisdom {
        &self.entries[face.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wisdom> {
        self.entries.iter()
    }

    /// First entry in catalogue order, shown before any spin or snap.
    pub fn first(&self) -> &Wisdom {
        &self.entries[0]
    }

    pub fn to_json(&self) -> Result<String, CatalogueError> {
        let wire = WireCatalogue {
            version: CURRENT_VERSION.to_string(),
            wisdoms: self.entries.clone(),
        };
        Ok(serde_json::to_string_pretty(&wire)?)
    }

    /// Accepts the versioned envelope or a bare array of entries.
    pub fn from_json(json: &str) -> Result<Self, CatalogueError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let entries: Vec<Wisdom> = if value.is_array() {
            serde_json::from_value(value)?
        } else {
            serde_json::from_value::<WireCatalogue>(value)?.wisdoms
        };
        Self::from_entries(entries)
    }

    /// The six timeless PHP wisdoms.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                wisdom(
                    1,
                    Face::Front,
                    "IDE Synergy",
                    "Code for your tools.",
                    "If your IDE can autocomplete it, Static Analysis can understand it. Avoid string-based dependency injection or magic factories where return types are hidden from your tools.",
                    r#"// Bad: inferred as mixed/object
$db = $app->get('DB_Connection');

// Good: Explicit return type
function getDb(): DB_Connection { ... }"#,
                    "bg-blue-600",
                    "Code",
                ),
                wisdom(
                    2,
                    Face::Back,
                    "Ban Magic",
                    "Explicit is better than implicit.",
                    "Magic methods like __get() and __call() are quick to write but impossible to analyze reliably. Explicit methods ensure type safety, refactoring support, and readable code.",
                    r#"// Hard to analyze
public function __get($name) { ... }

// Better: Explicit API
public function getBillDates(): array { ... }"#,
                    "bg-rose-600",
                    "Wand2",
                ),
                wisdom(
                    3,
                    Face::Right,
                    "Value Objects",
                    "Upgrade arrays to objects.",
                    "Complex array shapes are fragile. Value Objects provide runtime type safety, immutability, and a dedicated home for domain logic. They are the robust, refactorable alternative to associative arrays.",
                    r#"// Weak: Array Shape
// ['id' => 1, 'email' => 'me@ex.com']

// Strong: Value Object
final readonly class UserVO {
  public function __construct(
    public int $id,
    public string $email,
  ) {}
}"#,
                    "bg-emerald-600",
                    "BoxSelect",
                ),
                wisdom(
                    4,
                    Face::Left,
                    "Generic Contracts",
                    "Replace magic with templates.",
                    "Old Active Record patterns relied on fragile @method tags. The timeless fix is explicit inheritance: use @template in abstract base classes to automatically infer child types.",
                    r#"/** @template T of Model */
abstract class Builder {
  /** @return T|null */
  public function first() { ... }
}

// User is automatically inferred
$user = User::query()->first();"#,
                    "bg-purple-600",
                    "Type",
                ),
                wisdom(
                    5,
                    Face::Top,
                    "Refactorable Code",
                    "Avoid string typing.",
                    "Strings are invisible to static analysis. Never use strings for class or property names. Use `::class` and meta-methods like `m()` to reference properties safely, ensuring rename refactoring works.",
                    r#"// Bad
gen($obj, 'User', 'date');

// Good
gen($obj, User::class, $obj->m()->date);"#,
                    "bg-amber-600",
                    "ShieldAlert",
                ),
                wisdom(
                    6,
                    Face::Bottom,
                    "Automated Defense",
                    "Trust CI, not discipline.",
                    "Code quality relies on automated gates. Use Git Hooks (CaptainHook) and CI pipelines to mechanically prevent bad patterns (like global variables) from entering your codebase.",
                    r#"// captainhook.json
{
  "pre-commit": {
    "enabled": true,
    "actions": [
      { "action": "php vendor/bin/phpcs" }
    ]
  }
}"#,
                    "bg-cyan-600",
                    "Bot",
                ),
            ],
        }
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::builtin()
    }
}

#[allow(clippy::too_many_arguments)]
fn wisdom(
    id: u32,
    face: Face,
    title: &str,
    summary: &str,
    detail: &str,
    code_snippet: &str,
    color: &str,
    icon_name: &str,
) -> Wisdom {
    Wisdom {
        id,
        face,
        title: title.to_string(),
        summary: summary.to_string(),
        detail: detail.to_string(),
        code_snippet: code_snippet.to_string(),
        color: color.to_string(),
        icon_name: icon_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_one_per_face() {
        let cat = Catalogue::builtin();
        for face in Face::ALL {
            assert_eq!(cat.get(face).face, face);
        }
        assert_eq!(cat.first().title, "IDE Synergy");
    }

    #[test]
    fn test_from_entries_reorders() {
        let mut entries: Vec<Wisdom> = Catalogue::builtin().iter().cloned().collect();
        entries.reverse();
        let cat = Catalogue::from_entries(entries).unwrap();
        assert_eq!(cat, Catalogue::builtin());
    }

    #[test]
    fn test_from_entries_missing_face() {
        let entries: Vec<Wisdom> = Catalogue::builtin().iter().take(5).cloned().collect();
        let err = Catalogue::from_entries(entries).unwrap_err();
        assert!(matches!(err, CatalogueError::MissingFace(Face::Bottom)));
    }

    #[test]
    fn test_from_entries_seven_entries() {
        let mut entries: Vec<Wisdom> = Catalogue::builtin().iter().cloned().collect();
        entries.push(entries[2].clone());
        let err = Catalogue::from_entries(entries).unwrap_err();
        assert!(matches!(err, CatalogueError::DuplicateFace(Face::Right)));
    }

    #[test]
    fn test_from_entries_duplicate_face() {
        let mut entries: Vec<Wisdom> = Catalogue::builtin().iter().cloned().collect();
        entries[5].face = Face::Front;
        let err = Catalogue::from_entries(entries).unwrap_err();
        assert!(matches!(err, CatalogueError::DuplicateFace(Face::Front)));
    }

    #[test]
    fn test_json_roundtrip_camel_case() {
        let json = Catalogue::builtin().to_json().unwrap();
        assert!(json.contains("\"codeSnippet\""));
        assert!(json.contains("\"iconName\""));
        assert!(json.contains("\"face\": \"front\""));
        let back = Catalogue::from_json(&json).unwrap();
        assert_eq!(back, Catalogue::builtin());
    }

    #[test]
    fn test_from_json_bare_array() {
        let entries: Vec<Wisdom> = Catalogue::builtin().iter().cloned().collect();
        let json = serde_json::to_string(&entries).unwrap();
        assert!(Catalogue::from_json(&json).is_ok());
    }

    #[test]
    fn test_from_json_malformed() {
        let err = Catalogue::from_json("{not json").unwrap_err();
        assert!(matches!(err, CatalogueError::Json(_)));
    }

    #[test]
    fn test_background_gradient() {
        let cat = Catalogue::builtin();
        assert_eq!(
            cat.get(Face::Back).background_gradient(),
            "from-rose-300 via-rose-100 to-slate-50"
        );
        let mut odd = cat.get(Face::Front).clone();
        odd.color = "bg-lime-600".to_string();
        assert_eq!(odd.background_gradient(), default_gradient());
    }
}
