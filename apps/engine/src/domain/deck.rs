//! The static 78-card source deck.
//!
//! The deck is built once and never mutated: 22 major arcana with curated
//! text, followed by 56 minor arcana generated suit by suit. Ids are stable
//! and positional (0..=77), so persisted readings stay valid across runs.

use once_cell::sync::Lazy;

use crate::domain::cards::{Arcana, Card, Rank, Suit};

/// Total number of cards in the source deck.
pub const DECK_SIZE: usize = 78;

static DECK: Lazy<Vec<Card>> = Lazy::new(build_deck);

/// Borrow the full, immutable source deck.
pub fn full_deck() -> &'static [Card] {
    &DECK
}

struct MajorEntry {
    name: &'static str,
    keywords: [&'static str; 3],
    upright: &'static str,
    reversed: &'static str,
}

const MAJOR_ARCANA: [MajorEntry; 22] = [
    MajorEntry {
        name: "The Fool",
        keywords: ["beginnings", "spontaneity", "leap of faith"],
        upright: "A fresh start taken with an open heart; trust the first step.",
        reversed: "Hesitation or recklessness; the leap is taken blindly or not at all.",
    },
    MajorEntry {
        name: "The Magician",
        keywords: ["willpower", "skill", "manifestation"],
        upright: "Every tool you need is already on the table; act with intent.",
        reversed: "Scattered energy or trickery; talent without direction.",
    },
    MajorEntry {
        name: "The High Priestess",
        keywords: ["intuition", "mystery", "inner voice"],
        upright: "The answer is already known inwardly; listen before acting.",
        reversed: "Ignored instincts; secrets kept even from yourself.",
    },
    MajorEntry {
        name: "The Empress",
        keywords: ["abundance", "nurture", "growth"],
        upright: "Something tended with care is ready to flourish.",
        reversed: "Overprotection or neglect; growth stalls without room.",
    },
    MajorEntry {
        name: "The Emperor",
        keywords: ["structure", "authority", "stability"],
        upright: "Order and boundaries turn ambition into something lasting.",
        reversed: "Rigidity or a power held too tightly.",
    },
    MajorEntry {
        name: "The Hierophant",
        keywords: ["tradition", "guidance", "belief"],
        upright: "Proven paths and mentors carry you further than going alone.",
        reversed: "Convention chafes; your own doctrine is forming.",
    },
    MajorEntry {
        name: "The Lovers",
        keywords: ["union", "choice", "alignment"],
        upright: "A wholehearted choice; values and desire point the same way.",
        reversed: "Misalignment; a choice postponed strains the bond.",
    },
    MajorEntry {
        name: "The Chariot",
        keywords: ["drive", "victory", "control"],
        upright: "Opposing forces harnessed together; momentum rewards resolve.",
        reversed: "Pulling in two directions; drive without steering.",
    },
    MajorEntry {
        name: "Strength",
        keywords: ["courage", "patience", "gentle power"],
        upright: "Quiet persistence tames what force cannot.",
        reversed: "Self-doubt gnaws; strength mistaken for hardness.",
    },
    MajorEntry {
        name: "The Hermit",
        keywords: ["solitude", "reflection", "inner light"],
        upright: "Step back; the lantern shows one honest step at a time.",
        reversed: "Isolation past its purpose; withdrawal becomes hiding.",
    },
    MajorEntry {
        name: "Wheel of Fortune",
        keywords: ["cycles", "turning point", "fate"],
        upright: "The wheel turns in your favor; ride the change, don't grip it.",
        reversed: "Resisting a turn that has already happened.",
    },
    MajorEntry {
        name: "Justice",
        keywords: ["fairness", "truth", "consequence"],
        upright: "Accounts settle; clarity and honesty restore the balance.",
        reversed: "An imbalance avoided rather than addressed.",
    },
    MajorEntry {
        name: "The Hanged Man",
        keywords: ["surrender", "new angle", "pause"],
        upright: "A willing pause reveals what hurrying hid.",
        reversed: "Stalling dressed up as patience; the lesson repeats.",
    },
    MajorEntry {
        name: "Death",
        keywords: ["endings", "transformation", "release"],
        upright: "Something completes so something truer can begin.",
        reversed: "Clinging to a chapter already finished.",
    },
    MajorEntry {
        name: "Temperance",
        keywords: ["balance", "blending", "moderation"],
        upright: "Opposites mixed with patience become something finer.",
        reversed: "Excess on one side of the scale; the blend separates.",
    },
    MajorEntry {
        name: "The Devil",
        keywords: ["attachment", "temptation", "shadow"],
        upright: "Name the chain honestly; it is looser than it looks.",
        reversed: "The grip loosens; an old habit loses its glamour.",
    },
    MajorEntry {
        name: "The Tower",
        keywords: ["upheaval", "revelation", "collapse"],
        upright: "A false structure falls fast; what remains is real.",
        reversed: "A needed collapse postponed; cracks papered over.",
    },
    MajorEntry {
        name: "The Star",
        keywords: ["hope", "healing", "renewal"],
        upright: "After the storm, a clear sky; quiet confidence returns.",
        reversed: "Hope dimmed by fatigue; refill the well before pouring.",
    },
    MajorEntry {
        name: "The Moon",
        keywords: ["illusion", "uncertainty", "dreams"],
        upright: "Not everything seen in this light is true; move slowly.",
        reversed: "Fog lifting; fears shrink when named.",
    },
    MajorEntry {
        name: "The Sun",
        keywords: ["joy", "clarity", "vitality"],
        upright: "Unambiguous warmth; success you can enjoy in the open.",
        reversed: "A clouded brightness; joy deferred by small doubts.",
    },
    MajorEntry {
        name: "Judgement",
        keywords: ["reckoning", "awakening", "calling"],
        upright: "An honest reckoning frees you to answer the call.",
        reversed: "The verdict avoided; self-judgment louder than the call.",
    },
    MajorEntry {
        name: "The World",
        keywords: ["completion", "wholeness", "arrival"],
        upright: "A cycle closes in fullness; celebrate before the next turn.",
        reversed: "Almost finished; one loose thread keeps the circle open.",
    },
];

fn suit_theme(suit: Suit) -> &'static str {
    match suit {
        Suit::Wands => "passion and ambition",
        Suit::Cups => "feeling and relationship",
        Suit::Swords => "thought and truth",
        Suit::Pentacles => "work and material ground",
    }
}

fn rank_theme(rank: Rank) -> &'static str {
    match rank {
        Rank::Ace => "a seed of pure potential",
        Rank::Two => "a balance between two pulls",
        Rank::Three => "first visible growth",
        Rank::Four => "stability that wants guarding",
        Rank::Five => "friction and loss that teach",
        Rank::Six => "generosity and recovery",
        Rank::Seven => "assessment and perseverance",
        Rank::Eight => "disciplined movement",
        Rank::Nine => "near-completion and its weight",
        Rank::Ten => "a cycle carried to its fullness",
        Rank::Page => "a curious messenger",
        Rank::Knight => "committed pursuit",
        Rank::Queen => "mature, receptive mastery",
        Rank::King => "outward, directing mastery",
    }
}

fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn build_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);

    for (idx, entry) in MAJOR_ARCANA.iter().enumerate() {
        let id = idx as u8;
        deck.push(Card {
            id,
            arcana: Arcana::Major,
            name: entry.name.to_string(),
            keywords: entry.keywords.iter().map(|k| k.to_string()).collect(),
            image: format!("cards/{id:02}_{}.png", slugify(entry.name)),
            upright_meaning: entry.upright.to_string(),
            reversed_meaning: entry.reversed.to_string(),
        });
    }

    let suits = [Suit::Wands, Suit::Cups, Suit::Swords, Suit::Pentacles];
    let ranks = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Page,
        Rank::Knight,
        Rank::Queen,
        Rank::King,
    ];

    for suit in suits {
        for rank in ranks {
            let id = deck.len() as u8;
            let name = format!("{} of {}", rank.label(), suit.label());
            deck.push(Card {
                id,
                arcana: Arcana::Minor,
                name: name.clone(),
                keywords: vec![
                    rank_theme(rank).to_string(),
                    suit_theme(suit).to_string(),
                ],
                image: format!("cards/{id:02}_{}.png", slugify(&name)),
                upright_meaning: format!(
                    "{} expressed through {}.",
                    capitalize(rank_theme(rank)),
                    suit_theme(suit)
                ),
                reversed_meaning: format!(
                    "{} blocked or turned inward within {}.",
                    capitalize(rank_theme(rank)),
                    suit_theme(suit)
                ),
            });
        }
    }

    debug_assert_eq!(deck.len(), DECK_SIZE);
    deck
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}
