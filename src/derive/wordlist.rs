//! Fixed 512-word list for verbal pad verification.
//!
//! Words are 4 to 9 letters, drawn from concrete nouns, and unique in their
//! first four letters so a listener can tell them apart over a noisy room.

/// Number of entries; each word encodes 9 bits.
pub const WORDLIST_LEN: usize = 512;

pub const WORDLIST: [&str; WORDLIST_LEN] = [
    "acid", "acorn", "actor", "adobe", "agent", "alarm", "album", "alder",
    "alley", "alpha", "amber", "ample", "anchor", "angel", "ankle", "anvil",
    "apple", "apron", "arbor", "arch", "arctic", "arena", "armor", "arrow",
    "aspen", "atlas", "atom", "attic", "audio", "aunt", "autumn", "avian",
    "axis", "azure", "bacon", "badge", "bagel", "baker", "bamboo", "banjo",
    "barge", "baron", "basil", "baton", "beach", "beard", "beaver", "bell",
    "berry", "bison", "blade", "blaze", "blimp", "bloom", "bluff", "boat",
    "bonus", "boot", "bottle", "boulder", "brain", "brave", "bread", "brick",
    "bridge", "broom", "brush", "bubble", "bucket", "buffalo", "bugle", "bunny",
    "burrow", "butter", "cabin", "cactus", "cadet", "camera", "canal", "candle",
    "canoe", "canyon", "captain", "caramel", "cargo", "carpet", "castle", "cattle",
    "cave", "cedar", "cello", "chalk", "chapel", "cheese", "cherry", "chess",
    "chimney", "cider", "cinema", "circus", "citrus", "clam", "clay", "cliff",
    "clock", "cloud", "clover", "cobalt", "cobra", "coconut", "comet", "compass",
    "copper", "coral", "cotton", "cougar", "coyote", "crab", "crane", "crater",
    "crayon", "cricket", "crown", "crystal", "cuckoo", "cupcake", "curtain", "cyclone",
    "dagger", "dahlia", "daisy", "dancer", "delta", "denim", "desert", "diamond",
    "diesel", "dingo", "disco", "diver", "dolphin", "domino", "donkey", "dove",
    "dragon", "drum", "duck", "dune", "dynamo", "eagle", "easel", "echo",
    "eclipse", "elbow", "elder", "elephant", "ember", "emerald", "engine", "equator",
    "fable", "fabric", "falcon", "farm", "feather", "fern", "ferry", "fiddle",
    "finch", "fjord", "flag", "flame", "flute", "foam", "forest", "fossil",
    "fridge", "frog", "frost", "fudge", "funnel", "gadget", "galaxy", "gallon",
    "garden", "garlic", "gazebo", "gecko", "geyser", "ghost", "giant", "ginger",
    "giraffe", "glacier", "glove", "goat", "gondola", "goose", "gopher", "gorilla",
    "granite", "grape", "gravel", "guitar", "gull", "gumbo", "habit", "hammer",
    "hamster", "harbor", "harp", "hawk", "hazel", "helmet", "hermit", "heron",
    "hickory", "hippo", "hobby", "hockey", "honey", "horizon", "hornet", "hound",
    "hunter", "husky", "hyena", "iceberg", "icicle", "igloo", "iguana", "indigo",
    "inlet", "insect", "iris", "island", "ivory", "jacket", "jaguar", "jasmine",
    "jazz", "jelly", "jersey", "jester", "jewel", "jigsaw", "jockey", "juice",
    "jumbo", "jungle", "juniper", "kayak", "kernel", "kettle", "keyboard", "kilt",
    "kimono", "kingdom", "kitten", "kiwi", "knight", "koala", "label", "ladder",
    "lagoon", "lake", "lamp", "lantern", "laptop", "lasso", "lava", "lemon",
    "lemur", "leopard", "lettuce", "lever", "lily", "linen", "lion", "lizard",
    "llama", "lobster", "locket", "locust", "lotus", "lumber", "lunar", "lynx",
    "magnet", "mango", "mantis", "maple", "marble", "market", "mask", "meadow",
    "melon", "meteor", "mimic", "mirror", "mitten", "mocha", "monkey", "moose",
    "mosaic", "motor", "muffin", "mule", "museum", "mustard", "napkin", "narwhal",
    "nebula", "nectar", "needle", "nest", "nickel", "ninja", "noodle", "north",
    "nova", "nugget", "nutmeg", "nylon", "oasis", "oboe", "ocean", "octopus",
    "olive", "onion", "opal", "opera", "orange", "orbit", "orchid", "organ",
    "osprey", "otter", "oven", "oxygen", "oyster", "paddle", "pagoda", "palace",
    "panda", "panther", "paper", "parade", "parrot", "pasta", "peach", "peanut",
    "pearl", "pebble", "pelican", "pencil", "pepper", "piano", "pickle", "pigeon",
    "pilot", "pine", "pirate", "pizza", "planet", "plaza", "plum", "polar",
    "pony", "poppy", "potato", "pretzel", "prism", "puffin", "pumpkin", "puppet",
    "pyramid", "quail", "quartz", "queen", "quill", "quiver", "rabbit", "raccoon",
    "radar", "radio", "raft", "raisin", "ranch", "raven", "razor", "reef",
    "rhino", "ribbon", "ridge", "river", "robin", "rocket", "rodeo", "ruby",
    "rudder", "rugby", "saddle", "safari", "saffron", "salmon", "sandal", "satin",
    "saturn", "sauna", "scarf", "scooter", "season", "shadow", "shark", "shell",
    "sherpa", "shrimp", "silver", "siren", "skate", "sketch", "sloth", "snail",
    "sonar", "sphinx", "spider", "sponge", "squid", "stable", "statue", "stork",
    "sugar", "summit", "sunset", "tablet", "taco", "talon", "tango", "tapir",
    "tavern", "teapot", "temple", "tennis", "thistle", "thunder", "tiger", "timber",
    "toast", "tofu", "tomato", "topaz", "torch", "tornado", "tortoise", "tower",
    "tractor", "trumpet", "tulip", "tundra", "tunnel", "turkey", "turtle", "tuxedo",
    "ukulele", "umpire", "unicorn", "uniform", "urchin", "utopia", "valley", "vanilla",
    "vapor", "velvet", "venus", "vessel", "violet", "viper", "visor", "vivid",
    "volcano", "voyage", "vulture", "waffle", "wagon", "walnut", "walrus", "waltz",
    "water", "weasel", "whale", "wheat", "whistle", "willow", "window", "wizard",
    "wombat", "wrench", "xylophone", "yacht", "yarn", "yeti", "yodel", "yogurt",
    "yucca", "zebra", "zenith", "zephyr", "zigzag", "zinc", "zipper", "zodiac",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_wordlist_unique_prefixes() {
        let prefixes: HashSet<&str> = WORDLIST.iter().map(|w| &w[..4]).collect();
        assert_eq!(prefixes.len(), WORDLIST_LEN);
    }

    #[test]
    fn test_wordlist_lowercase_ascii() {
        assert!(WORDLIST
            .iter()
            .all(|w| w.len() >= 4 && w.bytes().all(|b| b.is_ascii_lowercase())));
    }
}
