//! Styling checklist and closet segments derived from an event's dress code

/// Build the styling checklist for a dress code and strictness
///
/// # Example
///
/// ```rust
/// use beat_core::skeleton::generate_checklist;
///
/// let items = generate_checklist("Garden Party", 8);
/// assert_eq!(items[0], "Event-appropriate outfit");
/// assert_eq!(items[2], "Elegant flats or low heels");
/// assert_eq!(items.len(), 7);
/// ```
#[must_use]
pub fn generate_checklist(dress_code: &str, strictness: i64) -> Vec<&'static str> {
    let code = dress_code.to_lowercase();
    let mut items = Vec::with_capacity(7);

    items.push(if contains_any(&code, &["couture", "gown", "formal"]) {
        "Couture outfit"
    } else if code.contains("casual") {
        "Styled casual outfit"
    } else {
        "Event-appropriate outfit"
    });

    items.push(if strictness >= 6 {
        "Statement accessory"
    } else {
        "Accessory"
    });

    items.push(if code.contains("garden") || code.contains("outdoor") {
        "Elegant flats or low heels"
    } else {
        "Elevated heels"
    });

    items.push("Elegant handbag");
    items.push("Signature scent");

    if strictness >= 8 {
        items.push("Hair styled");
        items.push("Flawless makeup");
    }

    items
}

/// Check if `text` contains any of `keys`
fn contains_any(text: &str, keys: &[&str]) -> bool {
    keys.iter().any(|key| text.contains(key))
}

/// One closet pass in the transformation beat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformationSegment {
    /// Segment label shown in the stage direction
    pub label: &'static str,
    /// Closet category opened
    pub category: &'static str,
    /// Scroll repeats through the category
    pub scroll_count: u32,
    /// Items hovered before choosing
    pub hover_items: Vec<String>,
    /// Item selected
    pub selected_item: &'static str,
    /// Prime's reaction on the first segment
    pub reaction_line: String,
    /// Checklist entry ticked by this segment
    pub checklist_item: String,
}

/// Wardrobe slot an item name is chosen for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemKind {
    Outfit,
    Accessory,
    Shoes,
    Bag,
    Fragrance,
}

/// Keyword → item name tables; first contained keyword wins
const OUTFIT_NAMES: &[(&str, &str)] = &[
    ("romantic", "BlushCorsetDress"),
    ("garden", "FloralTeaDress"),
    ("couture", "StructuredGown"),
    ("casual", "ElevatedCasualSet"),
];
const ACCESSORY_NAMES: &[(&str, &str)] = &[
    ("romantic", "PearlChoker"),
    ("garden", "DelicateGoldChain"),
    ("couture", "DiamondStatement"),
    ("casual", "LayeredBracelets"),
];
const SHOE_NAMES: &[(&str, &str)] = &[
    ("garden", "IvoryFlats"),
    ("casual", "PointedMules"),
    ("couture", "SilkHeels"),
];
const BAG_NAMES: &[(&str, &str)] = &[
    ("romantic", "VintageClutch"),
    ("garden", "LinenTote"),
    ("couture", "StructuredMinaudiere"),
    ("casual", "LeatherCrossbody"),
];
const FRAGRANCE_NAMES: &[(&str, &str)] = &[
    ("romantic", "RoseJasmineBlend"),
    ("garden", "WisteriaBreeze"),
    ("couture", "OudElixir"),
    ("casual", "FreshCitrus"),
];

impl ItemKind {
    /// Keyword table and fallback name
    const fn names(self) -> (&'static [(&'static str, &'static str)], &'static str) {
        match self {
            Self::Outfit => (OUTFIT_NAMES, "ElegantEventDress"),
            Self::Accessory => (ACCESSORY_NAMES, "ClassicPendant"),
            Self::Shoes => (SHOE_NAMES, "ElegantHeels"),
            Self::Bag => (BAG_NAMES, "ClassicClutch"),
            Self::Fragrance => (FRAGRANCE_NAMES, "SignatureBlend"),
        }
    }

    /// Pick the item name matching a lower-cased dress code
    fn item_name(self, dress_code: &str) -> &'static str {
        let (table, fallback) = self.names();
        table
            .iter()
            .find(|(keyword, _)| dress_code.contains(*keyword))
            .map_or(fallback, |&(_, name)| name)
    }
}

/// Styling adjectives for a closet browse bias
#[must_use]
pub fn bias_adjectives(bias: &str) -> [&'static str; 3] {
    match bias.trim().to_lowercase().as_str() {
        "glam" => ["sparkling", "bold", "dramatic"],
        "cozy" => ["soft", "warm", "flowing"],
        "couture" => ["structured", "architectural", "exquisite"],
        "trendy" => ["fresh", "modern", "statement"],
        "romantic" => ["delicate", "floral", "vintage"],
        _ => ["classic", "elegant", "refined"],
    }
}

/// Map checklist items to closet segments
///
/// Items that match no closet category are skipped.
#[must_use]
pub fn generate_transformation_segments(
    checklist: &[&str],
    dress_code: &str,
    bias: &str,
) -> Vec<TransformationSegment> {
    let code = dress_code.to_lowercase();
    let [first, second, _] = bias_adjectives(bias);

    checklist
        .iter()
        .filter_map(|item| {
            let lower = item.to_lowercase();
            let (label, scroll_count, hover_items, selected_item, reaction_line) =
                if contains_any(&lower, &["outfit", "gown", "dress"]) {
                    (
                        "Outfit",
                        5,
                        vec![format!("{first}Option1"), format!("{second}Option2")],
                        ItemKind::Outfit.item_name(&code),
                        format!("this {first} piece?"),
                    )
                } else if contains_any(&lower, &["accessor", "statement"]) {
                    (
                        "Accessories",
                        4,
                        vec![format!("{first}Necklace")],
                        ItemKind::Accessory.item_name(&code),
                        format!("that {second} accent..."),
                    )
                } else if contains_any(&lower, &["heel", "flat", "shoe"]) {
                    (
                        "Shoes",
                        4,
                        Vec::new(),
                        ItemKind::Shoes.item_name(&code),
                        "those are perfect.".to_string(),
                    )
                } else if contains_any(&lower, &["bag", "clutch"]) {
                    (
                        "Bags",
                        3,
                        Vec::new(),
                        ItemKind::Bag.item_name(&code),
                        "subtle but powerful.".to_string(),
                    )
                } else if contains_any(&lower, &["scent", "fragrance", "perfume"]) {
                    (
                        "Fragrance",
                        3,
                        Vec::new(),
                        ItemKind::Fragrance.item_name(&code),
                        "this scent is everything.".to_string(),
                    )
                } else if lower.contains("hair") {
                    ("Hair", 3, Vec::new(), "PolishedUpdo", "the finishing touch.".to_string())
                } else if lower.contains("makeup") {
                    (
                        "Makeup",
                        3,
                        Vec::new(),
                        "FlawlessGlam",
                        "she looks untouchable.".to_string(),
                    )
                } else {
                    return None;
                };

            Some(TransformationSegment {
                label,
                category: label,
                scroll_count,
                hover_items,
                selected_item,
                reaction_line,
                checklist_item: (*item).to_string(),
            })
        })
        .collect()
}
