//! Name tables for the host's tile, wall, paint and slope ids.
//!
//! Names are the host's identifiers split at case boundaries and lowercased
//! (`ClosedDoor` becomes `closed door`).

/// Pseudo tile types accepted wherever a tile is expected.
pub static PSEUDO_TILES: &[(i32, &str)] = &[(-1, "air"), (-2, "lava"), (-3, "honey"), (-4, "water")];

pub static TILES: &[(u16, &str)] = &[
    (0, "dirt"),
    (1, "stone"),
    (2, "grass"),
    (3, "plants"),
    (4, "torches"),
    (5, "trees"),
    (6, "iron"),
    (7, "copper"),
    (8, "gold"),
    (9, "silver"),
    (10, "closed door"),
    (11, "open door"),
    (12, "heart"),
    (13, "bottles"),
    (14, "tables"),
    (15, "chairs"),
    (16, "anvils"),
    (17, "furnaces"),
    (18, "work benches"),
    (19, "platforms"),
    (20, "saplings"),
    (21, "containers"),
    (22, "demonite"),
    (23, "corrupt grass"),
    (24, "corrupt plants"),
    (25, "ebonstone"),
    (26, "demon altar"),
    (27, "sunflower"),
    (28, "pots"),
    (29, "piggy bank"),
    (30, "wood block"),
    (31, "shadow orbs"),
    (32, "corrupt thorns"),
    (33, "candles"),
    (34, "chandeliers"),
    (35, "jackolanterns"),
    (36, "presents"),
    (37, "meteorite"),
    (38, "gray brick"),
    (39, "red brick"),
    (40, "clay block"),
    (41, "blue dungeon brick"),
    (42, "hanging lanterns"),
    (43, "green dungeon brick"),
    (44, "pink dungeon brick"),
    (45, "gold brick"),
    (46, "silver brick"),
    (47, "copper brick"),
    (48, "spikes"),
    (49, "water candle"),
    (50, "books"),
    (51, "cobweb"),
    (52, "vines"),
    (53, "sand"),
    (54, "glass"),
    (55, "signs"),
    (56, "obsidian"),
    (57, "ash"),
    (58, "hellstone"),
    (59, "mud"),
    (60, "jungle grass"),
    (61, "jungle plants"),
    (62, "jungle vines"),
    (63, "sapphire"),
    (64, "ruby"),
    (65, "emerald"),
    (66, "topaz"),
    (67, "amethyst"),
    (68, "diamond"),
    (69, "jungle thorns"),
    (70, "mushroom grass"),
    (71, "mushroom plants"),
    (72, "mushroom trees"),
    (73, "plants2"),
    (74, "jungle plants2"),
    (75, "obsidian brick"),
    (76, "hellstone brick"),
    (77, "hellforge"),
    (78, "clay pot"),
    (79, "beds"),
    (80, "cactus"),
    (81, "coral"),
    (82, "immature herbs"),
    (83, "mature herbs"),
    (84, "blooming herbs"),
    (85, "tombstones"),
    (86, "loom"),
    (87, "pianos"),
    (88, "dressers"),
    (89, "benches"),
    (90, "bathtubs"),
    (91, "banners"),
    (92, "lampposts"),
    (93, "lamps"),
    (94, "kegs"),
    (95, "chinese lanterns"),
    (96, "cooking pots"),
    (97, "safes"),
    (98, "skull lanterns"),
    (99, "trash can"),
    (100, "candelabras"),
    (395, "item frame"),
    (425, "announcement box"),
    (467, "containers2"),
];

/// Tile types whose cells carry frame coordinates.
pub static FRAME_IMPORTANT: &[u16] = &[
    3, 4, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 24, 26, 27, 28, 29, 31, 33, 34, 35, 36,
    42, 49, 50, 55, 61, 71, 72, 73, 74, 77, 78, 79, 81, 82, 83, 84, 85, 86, 87, 88, 89, 90, 91,
    92, 93, 94, 95, 96, 97, 98, 99, 100, 395, 425, 467,
];

pub static WALLS: &[(u8, &str)] = &[
    (0, "air"),
    (1, "stone"),
    (2, "dirt unsafe"),
    (3, "ebonstone unsafe"),
    (4, "wood"),
    (5, "gray brick"),
    (6, "red brick"),
    (7, "blue dungeon unsafe"),
    (8, "green dungeon unsafe"),
    (9, "pink dungeon unsafe"),
    (10, "gold brick"),
    (11, "silver brick"),
    (12, "copper brick"),
    (13, "hellstone brick unsafe"),
    (14, "obsidian brick unsafe"),
    (15, "mud unsafe"),
    (16, "dirt"),
    (17, "blue dungeon"),
    (18, "green dungeon"),
    (19, "pink dungeon"),
    (20, "obsidian brick"),
    (21, "glass"),
    (22, "pearlstone brick"),
    (23, "iridescent brick"),
    (24, "mudstone brick"),
    (25, "cobalt brick"),
    (26, "mythril brick"),
    (27, "planked"),
    (28, "pearlstone brick unsafe"),
    (29, "candy cane"),
    (30, "green candy cane"),
];

pub static COLORS: &[(u8, &str)] = &[
    (0, "blank"),
    (1, "red"),
    (2, "orange"),
    (3, "yellow"),
    (4, "lime"),
    (5, "green"),
    (6, "teal"),
    (7, "cyan"),
    (8, "sky blue"),
    (9, "blue"),
    (10, "purple"),
    (11, "violet"),
    (12, "pink"),
    (13, "deep red"),
    (14, "deep orange"),
    (15, "deep yellow"),
    (16, "deep lime"),
    (17, "deep green"),
    (18, "deep teal"),
    (19, "deep cyan"),
    (20, "deep sky blue"),
    (21, "deep blue"),
    (22, "deep purple"),
    (23, "deep violet"),
    (24, "deep pink"),
    (25, "black"),
    (26, "white"),
    (27, "gray"),
    (28, "brown"),
    (29, "shadow"),
    (30, "negative"),
];

/// `u` and `d` are accepted for `t` and `b` on the diagonal slopes.
pub static SLOPES: &[(u8, &str)] = &[
    (0, "none"),
    (1, "t"),
    (2, "tr"),
    (2, "ur"),
    (3, "tl"),
    (3, "ul"),
    (4, "br"),
    (4, "dr"),
    (5, "bl"),
    (5, "dl"),
];
