//! Static card, environment, and item definitions.
//!
//! The catalog is the printed card list. Ids and image paths are attached
//! when the deck factory deals a copy into a game.

use super::definition::{CardType, DiscardCost, ItemCategory, Power};

/// Printed player card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardTemplate {
    pub title: &'static str,
    pub card_type: CardType,
    pub power: Power,
    pub effect: &'static str,
}

/// Printed environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnvironmentTemplate {
    pub title: &'static str,
    pub description: &'static str,
}

/// Printed item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemTemplate {
    pub title: &'static str,
    pub category: ItemCategory,
    pub description: &'static str,
    pub discard_cost: DiscardCost,
}

const fn card(
    title: &'static str,
    card_type: CardType,
    power: Power,
    effect: &'static str,
) -> CardTemplate {
    CardTemplate {
        title,
        card_type,
        power,
        effect,
    }
}

const fn env(title: &'static str, description: &'static str) -> EnvironmentTemplate {
    EnvironmentTemplate { title, description }
}

const fn item(
    title: &'static str,
    category: ItemCategory,
    discard_cost: DiscardCost,
    description: &'static str,
) -> ItemTemplate {
    ItemTemplate {
        title,
        category,
        description,
        discard_cost,
    }
}

const ACOLYTE_TEXT: &str =
    "If you have more Acolytes in play than each of your opponents, this card gets +3 power.";
const ELECTRIC_TEXT: &str = "When anyone plays a DIVINE GIFT, before they resolve its effect: they must discard 1 card from their hand or from the cards they have in play for each ELECTRIC card in play here.";
const FIRE_TEXT: &str = "When this card is in play, no one can play a BEAST card here.";
const WATER_TEXT: &str = "When this card is in play, it gives +2 Power to all ELECTRIC cards and -2 Power to all FIRE cards (card Power cannot go below 0).";

/// Title of the dynamic-power Colossus.
pub const CHANNEL_POWER: &str = "Channel Power";

/// One player's deck list (24 cards).
pub const PLAYER_CARDS: [CardTemplate; 24] = [
    card("Acolyte", CardType::Acolyte, Power::Fixed(2), ACOLYTE_TEXT),
    card("Acolyte", CardType::Acolyte, Power::Fixed(2), ACOLYTE_TEXT),
    card("Acolyte", CardType::Acolyte, Power::Fixed(2), ACOLYTE_TEXT),
    card("Acolyte", CardType::Acolyte, Power::Fixed(2), ACOLYTE_TEXT),
    card("Abduct", CardType::Beast, Power::Fixed(2), "Take 1 card that is in play for an opponent, and put it face-down on top of your deck. The card you abducted is now part of your deck. You cannot Abduct an Item."),
    card("Pillage", CardType::Beast, Power::Fixed(2), "Choose a card type. Each of your opponents must discard a card of that type from their hand, or discard 2 cards from their hand of types other than the type you chose."),
    card("Rampage", CardType::Beast, Power::Fixed(2), "All of your opponents must discard cards from their hand until their hand size is equal to your hand size."),
    card("Bluff", CardType::Colossus, Power::Fixed(4), "If this card is in play when scoring a Skirmish, you may move it face-down to another Environment instead of scoring it."),
    card(CHANNEL_POWER, CardType::Colossus, Power::Dynamic, "Find your opponent who has the most cards in play here. This card's power is equal to the number of cards that opponent has in play here. This card's power changes as opponents play more cards."),
    card("Curse", CardType::Colossus, Power::Fixed(-3), "When you play this card, you may play it in front of an opponent instead of playing it for yourself. It is in play for them, and becomes part of their deck."),
    card("Heap", CardType::Colossus, Power::Fixed(0), "Choose any amount of cards from your hand and from your cards in play here, and tuck them face-down under this card. The cards you chose are no longer in play. For each card you tucked, this card gains +2 Power."),
    card("Manifest", CardType::Colossus, Power::Fixed(1), "Immediately play another card from your hand, even if you are not allowed to play that card right now."),
    card("Companionship", CardType::DivineGift, Power::Fixed(0), "Draw 2 cards from your deck."),
    card("Extrication", CardType::DivineGift, Power::Fixed(0), "Choose 1 card that is in play for you and return it to your hand."),
    card("Foresight", CardType::DivineGift, Power::Fixed(0), "Look at the top 4 cards from your deck. Add 1 of them in your hand, and return the other 3 to the top of your deck in any order you choose."),
    card("Replacements", CardType::DivineGift, Power::Fixed(0), "Discard as many cards from your hand as you want. Then draw 1 card from your deck for every card you discarded."),
    card("Solidarity", CardType::DivineGift, Power::Fixed(0), "Choose 1 of the other Environments. Pick up all the cards you've prepared there, and add them to your hand."),
    card("Spark", CardType::Electric, Power::Fixed(1), ELECTRIC_TEXT),
    card("Bolt", CardType::Electric, Power::Fixed(4), ELECTRIC_TEXT),
    card("Flame", CardType::Fire, Power::Fixed(6), FIRE_TEXT),
    card("Inferno", CardType::Fire, Power::Fixed(10), FIRE_TEXT),
    card("Droplet", CardType::Water, Power::Fixed(1), WATER_TEXT),
    card("Shower", CardType::Water, Power::Fixed(3), WATER_TEXT),
    card("Downpour", CardType::Water, Power::Fixed(5), WATER_TEXT),
];

/// The environment deck (19 environments).
pub const ENVIRONMENTS: [EnvironmentTemplate; 19] = [
    env("Badlands", "During Skirmishes here: when you play a BEAST card, your opponents must discard 1 extra card. You cannot play FIRE cards here."),
    env("Blitz Creek", "During Skirmishes here, if you have 25 or more Power in play at the end of your turn, your opponents must discard all the cards in their hands."),
    env("Cavern", "During Skirmishes here, if you have 5 or more cards in play when your turn starts, you must Pass."),
    env("Chaos Fissure", "When you prepare a card here during Handbuilding: all opponents must also immediately prepare a card here. Then the player to your left takes their turn as usual. When a Skirmish starts here, shuffle all the cards prepared here together and deal them evenly."),
    env("Desert", "During Skirmishes here, you cannot play WATER cards."),
    env("Glass River", "All cards prepared here must be face-up rather than face-down."),
    env("Graveyard", "When a Skirmish starts here, before the Initiator plays their first card, everyone searches their discard piles for Acolytes and immediately plays all Acolytes they find."),
    env("Hallowed Ground", "During Skirmishes here, you can only play WATER, FIRE, and ELECTRIC cards if you have more ACOLYTES in play than your opponents."),
    env("Impulse Isle", "During Skirmishes here, you will only have 1 turn. On your turn, continue to play cards 1 by 1 and resolve them as you play them until your hand is empty, or until you Pass. On your turn you may still take Items as usual. Beast cards have no effect here."),
    env("Magnetic Maar", "You can never prepare cards here. At the start of your turn during the Handbuilding phase, if each player has a total of 7 or more cards prepared on the other 2 Environments: everyone must immediately move all their prepared cards here, and you must initiate a Skirmish here."),
    env("Oasis", "When a Skirmish starts here, before the Initiator plays their first card, draw 3 cards if you have fewer cards prepared on this Environment than all of your opponents."),
    env("Outskirts", "You may Initiate a Skirmish here, even if there are no cards prepared here. However, you can only Initiate a Skirmish here if an opponent has won more Skirmishes than you."),
    env("Poison Swamp", "After you prepare a card here in the Handbuilding phase, discard the other 2 cards from your hand, then draw back up to 3 cards."),
    env("Sacrifice Mountain", "At the start of your first turn during Skirmishes here: choose 2 cards from your hand and put them on the top of any opponent's deck. Those cards are now part of their deck."),
    env("Stockpile Steppe", "When this is drawn, place 3 Items face-down here. When a Skirmish starts here, flip all 3 Items face-up."),
    env("The Brink", "When preparing a card here during the Handbuilding phase, you must immediately prepare all 3 cards from your hand here, and draw 3 cards from your deck. Then, discard 1 card that an opponent has prepared here."),
    env("The Sticks", "Every time you play a FIRE card here during a Skirmish, discard 1 card in play here that is not a FIRE card."),
    env("Volcano", "After passing during Skirmishes here, discard all cards remaining in your hand instead of moving those cards to other Environments."),
    env("Zenith", "When a Skirmish starts here: draw 3 cards if you are 2 or more Skirmishes away from winning the game. There is no hand limit here."),
];

/// The item deck (30 items).
pub const ITEMS: [ItemTemplate; 30] = [
    item("Boiler", ItemCategory::Perk, DiscardCost::Fixed(1), "WATER cards here give your FIRE cards here +2 instead of -2 Power."),
    item("Colossus Coil", ItemCategory::Perk, DiscardCost::Fixed(1), "+2 Power for all of your ELECTRIC cards here."),
    item("Divine Icon", ItemCategory::Perk, DiscardCost::Fixed(1), "+1 Power for all of your DIVINE GIFT cards here."),
    item("Ebenezer", ItemCategory::Perk, DiscardCost::Variable, "Discard your entire hand. This card gives you +10 Power."),
    item("Edible Carnage", ItemCategory::Perk, DiscardCost::Fixed(1), "+2 Power for all of your BEAST cards here."),
    item("Oil", ItemCategory::Perk, DiscardCost::Fixed(1), "+2 Power for all of your FIRE cards here."),
    item("Orb", ItemCategory::Perk, DiscardCost::Fixed(1), "+2 Power for all of your COLOSSUS cards here."),
    item("Pointier Sticks", ItemCategory::Perk, DiscardCost::Fixed(1), "+2 Power for all of your ACOLYTE cards here."),
    item("Turbine", ItemCategory::Perk, DiscardCost::Fixed(1), "+2 Power for all of your WATER cards here."),
    item("Wager", ItemCategory::Perk, DiscardCost::Fixed(0), "Guess aloud who will win this Skirmish. If you are correct: draw 2 cards from your deck and prepare them on the next Environment drawn. If you are wrong, discard all of your prepared cards everywhere."),
    item("Alms", ItemCategory::Discard, DiscardCost::Fixed(1), "If you discarded the last card in your hand to take this, draw 3 cards. Otherwise, draw nothing."),
    item("Cache", ItemCategory::Discard, DiscardCost::Fixed(1), "Pass, and flip up to 3 of your cards in play here face-down. Those cards are no longer in play, and are prepared for the next Environment drawn here."),
    item("Caravan", ItemCategory::Discard, DiscardCost::Fixed(1), "Move up to 3 of your cards in play here to other Environments."),
    item("Cloak", ItemCategory::Discard, DiscardCost::Fixed(0), "Place a card face-down here, and do not reveal it until scoring. It is not in play until you reveal it. If you reveal a WATER, FIRE, ELECTRIC, or ACOLYTE card, include it when scoring this Skirmish. Otherwise, discard it and do not resolve its effect."),
    item("Cyclone", ItemCategory::Discard, DiscardCost::Fixed(0), "Pick up all Items on all Environments and put each of them on any of the 3 Environments (each Environment can still only have a maximum of 3 Items)."),
    item("Dice", ItemCategory::Discard, DiscardCost::Fixed(0), "Draw a random card from the middle of your deck and show it to everyone. If it is a DIVINE GIFT, ACOLYTE, or COLOSSUS, keep it in your hand and draw 2 more cards. Otherwise, discard your entire hand (including the new card you drew)."),
    item("Divine Mirror", ItemCategory::Discard, DiscardCost::Fixed(1), "Copy the effect of any DIVINE GIFT in play here. Ignore any ELECTRIC cards in play when you do this."),
    item("Divine Totem", ItemCategory::Discard, DiscardCost::Fixed(1), "Immediately play a DIVINE GIFT from your hand, and resolve its effect twice."),
    item("Hatchet", ItemCategory::Discard, DiscardCost::Fixed(0), "Discard 1 Item on any Environment, or 1 Perk Item that is already in play for another player."),
    item("Lockpick", ItemCategory::Discard, DiscardCost::Fixed(2), "Look at the top card of each players' deck. Place 1 of them on top of your deck, and return any others to the decks they came from."),
    item("Looking Glass", ItemCategory::Discard, DiscardCost::Fixed(1), "Choose an opponent. They must show their entire hand to you."),
    item("Loot Chest", ItemCategory::Discard, DiscardCost::Fixed(1), "Draw 3 Items. You may immediately play any of these items for free if it has a discard cost of 0 or 1. Discard any of the 3 Items you don't play."),
    item("Magnet", ItemCategory::Discard, DiscardCost::Fixed(0), "Take an Item from 1 of the other 2 Environments and play it here immediately (you must still pay its discard cost)."),
    item("Olive Branch", ItemCategory::Discard, DiscardCost::Fixed(2), "For each Beast card you discarded to take this, draw 2 cards."),
    item("Poison Pill", ItemCategory::Discard, DiscardCost::Variable, "Discard any number of cards from your hand (must be more than 0). Each of your opponents must immediately discard the same number of cards from their hands."),
    item("Rallying Banner", ItemCategory::Discard, DiscardCost::Fixed(1), "Search your deck for an ACOLYTE. If you find one, play it immediately (limit to just 1 ACOLYTE). Shuffle your deck."),
    item("Recycler", ItemCategory::Discard, DiscardCost::Fixed(1), "Choose an Item from the Item discard pile that has a discard cost of 0 or 1. Play it immediately for free."),
    item("Secret Tunnel Keys", ItemCategory::Discard, DiscardCost::Fixed(1), "Immediately play a BEAST card, even if there are FIRE cards in play here."),
    item("Shrine", ItemCategory::Discard, DiscardCost::Fixed(1), "Choose 1 card from your discard pile and prepare it on either of the other 2 Environments."),
    item("Terraformer", ItemCategory::Discard, DiscardCost::Fixed(1), "Discard both of the non-active Environments where you are not currently Skirmishing, and replace them with the top Environments from the deck. Any Items should remain on the next Environments drawn."),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn count(card_type: CardType) -> usize {
        PLAYER_CARDS.iter().filter(|c| c.card_type == card_type).count()
    }

    #[test]
    fn test_deck_composition() {
        assert_eq!(PLAYER_CARDS.len(), 24);
        assert_eq!(count(CardType::Acolyte), 4);
        assert_eq!(count(CardType::Fire), 2);
        assert_eq!(
            CardType::ALL.iter().map(|&t| count(t)).sum::<usize>(),
            PLAYER_CARDS.len()
        );
    }

    #[test]
    fn test_only_channel_power_is_dynamic() {
        let dynamic: Vec<_> = PLAYER_CARDS
            .iter()
            .filter(|c| c.power == Power::Dynamic)
            .map(|c| c.title)
            .collect();
        assert_eq!(dynamic, vec![CHANNEL_POWER]);
    }

    #[test]
    fn test_environment_titles_unique() {
        let mut titles: Vec<_> = ENVIRONMENTS.iter().map(|e| e.title).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), ENVIRONMENTS.len());
    }

    #[test]
    fn test_item_categories() {
        let perks = ITEMS.iter().filter(|i| i.category == ItemCategory::Perk).count();
        assert_eq!(perks, 10);
        assert_eq!(ITEMS.len() - perks, 20);
    }
}
