//! Reference rows shipped with the application.
//!
//! The initial migration inserts the same rows into PostgreSQL; keep the two
//! lists in step.

/// `(id, name, type, power, accuracy, pp)` for each seeded move.
///
/// Ids are contiguous from 1.
pub const MOVES: &[(i32, &str, &str, Option<i32>, Option<i32>, i32)] = &[
    (1, "Pound", "normal", Some(40), Some(100), 35),
    (2, "Karate Chop", "fighting", Some(50), Some(100), 25),
    (3, "Double Slap", "normal", Some(15), Some(85), 10),
    (4, "Comet Punch", "normal", Some(18), Some(85), 15),
    (5, "Mega Punch", "normal", Some(80), Some(85), 20),
    (6, "Pay Day", "normal", Some(40), Some(100), 20),
    (7, "Fire Punch", "fire", Some(75), Some(100), 15),
    (8, "Ice Punch", "ice", Some(75), Some(100), 15),
    (9, "Thunder Punch", "electric", Some(75), Some(100), 15),
    (10, "Scratch", "normal", Some(40), Some(100), 35),
    (11, "Vice Grip", "normal", Some(55), Some(100), 30),
    (12, "Guillotine", "normal", None, Some(30), 5),
    (13, "Razor Wind", "normal", Some(80), Some(100), 10),
    (14, "Swords Dance", "normal", None, None, 20),
    (15, "Cut", "normal", Some(50), Some(95), 30),
    (16, "Gust", "flying", Some(40), Some(100), 35),
    (17, "Wing Attack", "flying", Some(60), Some(100), 35),
    (18, "Whirlwind", "normal", None, None, 20),
    (19, "Fly", "flying", Some(90), Some(95), 15),
    (20, "Bind", "normal", Some(15), Some(85), 20),
    (21, "Slam", "normal", Some(80), Some(75), 20),
    (22, "Vine Whip", "grass", Some(45), Some(100), 25),
    (23, "Stomp", "normal", Some(65), Some(100), 20),
    (24, "Double Kick", "fighting", Some(30), Some(100), 30),
    (25, "Mega Kick", "normal", Some(120), Some(75), 5),
    (26, "Jump Kick", "fighting", Some(100), Some(95), 10),
    (27, "Rolling Kick", "fighting", Some(60), Some(85), 15),
    (28, "Sand Attack", "ground", None, Some(100), 15),
    (29, "Headbutt", "normal", Some(70), Some(100), 15),
    (30, "Horn Attack", "normal", Some(65), Some(100), 25),
    (31, "Fury Attack", "normal", Some(15), Some(85), 20),
    (32, "Horn Drill", "normal", None, Some(30), 5),
    (33, "Tackle", "normal", Some(40), Some(100), 35),
    (34, "Body Slam", "normal", Some(85), Some(100), 15),
    (35, "Wrap", "normal", Some(15), Some(90), 20),
    (36, "Take Down", "normal", Some(90), Some(85), 20),
    (37, "Thrash", "normal", Some(120), Some(100), 10),
    (38, "Double-Edge", "normal", Some(120), Some(100), 15),
    (39, "Tail Whip", "normal", None, Some(100), 30),
    (40, "Poison Sting", "poison", Some(15), Some(100), 35),
    (41, "Twineedle", "bug", Some(25), Some(100), 20),
    (42, "Pin Missile", "bug", Some(25), Some(95), 20),
    (43, "Leer", "normal", None, Some(100), 30),
    (44, "Bite", "dark", Some(60), Some(100), 25),
    (45, "Growl", "normal", None, Some(100), 40),
];

/// `(id, name)` for each seeded species.
pub const SPECIES: &[(i32, &str)] = &[
    (1, "Bulbasaur"),
    (2, "Ivysaur"),
    (3, "Venusaur"),
    (4, "Charmander"),
    (5, "Charmeleon"),
    (6, "Charizard"),
    (7, "Squirtle"),
    (8, "Wartortle"),
    (9, "Blastoise"),
    (25, "Pikachu"),
    (26, "Raichu"),
    (133, "Eevee"),
    (143, "Snorlax"),
    (150, "Mewtwo"),
    (151, "Mew"),
];
