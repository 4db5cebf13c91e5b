use approx::assert_abs_diff_eq;

use tournament_ratings::config::RatingSettings;
use tournament_ratings::rating::{PlayerAttrs, PlayerType, Tournament};

type Game = (i32, i32, i32, &'static str);

fn tournament(desc: &str, players: Vec<(i32, PlayerAttrs)>, games: &[Game]) -> Tournament {
    let mut t = Tournament::new();
    t.set_desc(desc);
    for (num, attrs) in players {
        t.add_player(num, attrs).unwrap();
    }
    for &(round, player, opponent, score) in games {
        t.add_result(round, player, opponent, score).unwrap();
    }
    t
}

fn rated(rating: i32, kfactor: i32) -> PlayerAttrs {
    PlayerAttrs::new().rating(rating).kfactor(kfactor)
}

fn provisional(rating: i32, games: i32) -> PlayerAttrs {
    PlayerAttrs::new().rating(rating).games(games)
}

fn foreign(rating: i32) -> PlayerAttrs {
    PlayerAttrs::new().rating(rating)
}

fn unrated() -> PlayerAttrs {
    PlayerAttrs::new()
}

fn round_robin() -> Tournament {
    let players = (1..=4).map(|num| (num, rated(2200 - 100 * (num - 1), 10 * num))).collect();
    tournament(
        "Artificial round robin",
        players,
        &[
            (1, 1, 2, "W"),
            (1, 3, 4, "W"),
            (2, 1, 3, "W"),
            (2, 2, 4, "W"),
            (3, 1, 4, "W"),
            (3, 2, 3, "W"),
        ],
    )
}

#[test]
fn nothing_changes_before_rating() {
    let t = round_robin();
    for p in t.players() {
        assert_eq!(p.expected_score(), 0.0);
        assert_eq!(p.rating_change(), 0.0);
        assert_eq!(p.new_rating(), p.rating());
    }
}

#[test]
fn rated_round_robin() {
    let mut t = round_robin();
    t.rate().unwrap();

    let expected = [
        (1, 2.249, 7.51, 2207.5),
        (2, 1.760, 4.81, 2104.8),
        (3, 1.240, -7.21, 1992.8),
        (4, 0.751, -30.05, 1870.0),
    ];
    for (num, expected_score, change, new_rating) in expected {
        let p = t.player(num).unwrap();
        assert_abs_diff_eq!(p.expected_score(), expected_score, epsilon = 0.001);
        assert_abs_diff_eq!(p.rating_change(), change, epsilon = 0.01);
        assert_abs_diff_eq!(p.new_rating().unwrap(), new_rating, epsilon = 0.1);
        assert_eq!(p.bonus(), Some(0.0));
    }
    assert_eq!(t.iterations1(), 2);
    assert_eq!(t.iterations2(), 0);
}

#[test]
fn rated_match() {
    let mut t = tournament(
        "Dempsey-O'Raghallaigh Match 2009",
        vec![(1, rated(1347, 24)), (2, rated(1303, 32))],
        &[(1, 1, 2, "W"), (2, 1, 2, "W"), (3, 1, 2, "W")],
    );
    t.rate().unwrap();

    assert_abs_diff_eq!(t.player(1).unwrap().expected_score(), 1.689, epsilon = 0.001);
    assert_abs_diff_eq!(t.player(2).unwrap().expected_score(), 1.311, epsilon = 0.001);
    assert_abs_diff_eq!(t.player(1).unwrap().new_rating().unwrap(), 1378.0, epsilon = 0.5);
    assert_abs_diff_eq!(t.player(2).unwrap().new_rating().unwrap(), 1261.0, epsilon = 0.5);
}

fn foreign_open() -> Tournament {
    let foreigners = [
        (3, 1877),
        (4, 1972),
        (5, 1931),
        (6, 2105),
        (7, 1808),
        (8, 1975),
        (9, 1990),
        (10, 1982),
        (11, 2107),
        (12, 2423),
        (14, 1621),
        (15, 1779),
        (16, 2209),
        (17, 1967),
        (18, 2151),
        (19, 2187),
        (20, 2227),
    ];
    let mut players = vec![(1, rated(2105, 16)), (2, rated(1976, 24))];
    players.extend(foreigners.into_iter().map(|(num, rating)| (num, foreign(rating))));

    tournament(
        "Prague Open 2008",
        players,
        &[
            (1, 1, 3, "L"),
            (2, 1, 4, "L"),
            (3, 1, 5, "D"),
            (4, 1, 6, "D"),
            (5, 1, 7, "D"),
            (6, 1, 8, "W"),
            (7, 1, 9, "D"),
            (8, 1, 10, "W"),
            (9, 1, 11, "D"),
            (1, 2, 12, "L"),
            (2, 2, 5, "W"),
            (3, 2, 14, "L"),
            (4, 2, 15, "W"),
            (5, 2, 16, "L"),
            (6, 2, 17, "W"),
            (7, 2, 18, "D"),
            (8, 2, 19, "D"),
            (9, 2, 20, "L"),
        ],
    )
}

#[test]
fn foreign_players_keep_their_ratings() {
    let mut t = foreign_open();
    t.rate().unwrap();

    for p in t.players().filter(|p| p.player_type() == PlayerType::Foreign) {
        assert_ne!(p.expected_score(), 0.0);
        assert_eq!(p.rating_change(), 0.0);
        assert_eq!(p.new_rating(), p.rating());
        assert_eq!(p.bonus(), None);
    }
}

#[test]
fn foreign_players_get_performances() {
    let mut t = foreign_open();
    t.rate().unwrap();

    let performances = [
        (3, 2505.0),
        (4, 2505.0),
        (5, 1840.5),
        (6, 2105.0),
        (7, 2105.0),
        (8, 1705.0),
        (9, 2105.0),
        (10, 1705.0),
        (11, 2105.0),
        (12, 2376.0),
        (14, 2376.0),
        (15, 1576.0),
        (16, 2376.0),
        (17, 1576.0),
        (18, 1976.0),
        (19, 1976.0),
        (20, 2376.0),
    ];
    for (num, performance) in performances {
        assert_abs_diff_eq!(t.player(num).unwrap().performance().unwrap(), performance, epsilon = 1e-9);
    }
}

#[test]
fn irish_players_abroad() {
    let mut t = foreign_open();
    t.rate().unwrap();

    let fox = t.player(1).unwrap();
    assert_eq!(fox.score(), 4.5);
    assert_abs_diff_eq!(fox.expected_score(), 6.054, epsilon = 0.001);
    assert_abs_diff_eq!(fox.new_rating().unwrap(), 2080.0, epsilon = 0.5);

    let cafolla = t.player(2).unwrap();
    assert_eq!(cafolla.score(), 4.0);
    assert_abs_diff_eq!(cafolla.expected_score(), 3.685, epsilon = 0.001);
    assert_abs_diff_eq!(cafolla.new_rating().unwrap(), 1984.0, epsilon = 0.5);
}

#[test]
fn players_of_all_kinds() {
    let mut t = tournament(
        "K Factor Test",
        vec![
            (1, rated(2174, 16)),
            (2, rated(1167, 24)),
            (3, provisional(751, 19)),
            (4, provisional(1273, 19)),
            (5, provisional(627, 10)),
            (6, provisional(684, 10)),
            (7, unrated()),
            (8, unrated()),
        ],
        &[
            (1, 1, 8, "W"),
            (1, 2, 7, "W"),
            (1, 3, 6, "W"),
            (1, 4, 5, "W"),
            (2, 1, 3, "W"),
            (2, 2, 4, "W"),
            (2, 5, 7, "W"),
            (2, 6, 8, "W"),
            (3, 1, 2, "W"),
            (3, 3, 4, "W"),
            (3, 5, 6, "W"),
            (3, 7, 8, "W"),
        ],
    );
    t.rate().unwrap();

    let expected = [
        (1, 3.00, 2174.0),
        (2, 1.36, 1182.0),
        (3, 0.85, 851.0),
        (4, 2.38, 1206.0),
        (5, 1.05, 717.0),
        (6, 1.04, 678.0),
        (7, 1.09, 763.0),
        (8, 1.24, 805.0),
    ];
    for (num, expected_score, new_rating) in expected {
        let p = t.player(num).unwrap();
        assert_abs_diff_eq!(p.expected_score(), expected_score, epsilon = 0.01);
        assert_abs_diff_eq!(p.new_rating().unwrap(), new_rating, epsilon = 0.5);
    }
}

fn drogheda_section_g() -> Tournament {
    tournament(
        "Drogheda Club Championship, 2009, Section G",
        vec![
            (1, rated(1046, 24)),
            (2, rated(953, 24)),
            (3, rated(922, 32)),
            (4, rated(760, 40)),
            (5, rated(825, 32)),
            (6, rated(1002, 32)),
        ],
        &[
            (1, 1, 6, "W"),
            (1, 2, 5, "W"),
            (1, 3, 4, "L"),
            (2, 6, 4, "D"),
            (2, 5, 3, "L"),
            (2, 1, 2, "W"),
            (3, 2, 6, "W"),
            (3, 3, 1, "L"),
            (3, 4, 5, "L"),
            (4, 6, 5, "D"),
            (4, 1, 4, "L"),
            (4, 2, 3, "L"),
            (5, 3, 6, "D"),
            (5, 4, 2, "L"),
            (5, 5, 1, "L"),
        ],
    )
}

const SECTION_G: [(i32, f64, f64, f64, f64); 6] = [
    (1, 4.0, 3.43, 1060.0, 0.0),
    (2, 3.0, 2.70, 960.0, 0.0),
    (3, 2.5, 2.44, 924.0, 0.0),
    (4, 2.5, 1.30, 824.0, 16.0),
    (5, 1.5, 1.67, 819.0, 0.0),
    (6, 1.5, 3.09, 951.0, 0.0),
];

#[test]
fn one_rated_player_earns_a_bonus() {
    let mut t = drogheda_section_g();
    t.rate().unwrap();

    for (num, score, expected_score, new_rating, bonus) in SECTION_G {
        let p = t.player(num).unwrap();
        assert_eq!(p.score(), score);
        assert_abs_diff_eq!(p.expected_score(), expected_score, epsilon = 0.01);
        assert_abs_diff_eq!(p.new_rating().unwrap(), new_rating, epsilon = 0.5);
        assert_eq!(p.bonus(), Some(bonus));
    }
    assert_eq!(t.iterations2(), 1);
}

#[test]
fn improved_preset_keeps_a_first_pass_bonus() {
    let mut t = drogheda_section_g();
    t.rate_with(&RatingSettings::improved()).unwrap();

    let guinan = t.player(4).unwrap();
    assert_eq!(guinan.bonus(), Some(16.0));
    assert_abs_diff_eq!(guinan.new_rating().unwrap(), 824.0, epsilon = 0.5);
    assert!(t.iterations2() >= 1);
}

#[test]
fn bonus_among_foreigners() {
    let mut t = tournament(
        "European Youth Chess Championships, 2008",
        vec![
            (1, rated(1667, 40)),
            (2, foreign(2036)),
            (3, foreign(1790)),
            (4, foreign(1832)),
            (5, foreign(1832)),
            (6, foreign(1939)),
            (7, foreign(1955)),
            (8, foreign(1893)),
        ],
        &[
            (1, 1, 8, "L"),
            (3, 1, 3, "W"),
            (5, 1, 5, "L"),
            (6, 1, 7, "W"),
            (7, 1, 6, "W"),
            (8, 1, 4, "W"),
            (9, 1, 2, "L"),
        ],
    );
    t.rate().unwrap();

    let expected = [
        (1, 4.0, 1.54, 1954.0),
        (2, 1.0, 0.76, 2236.0),
        (3, 0.0, 0.43, 1436.0),
        (4, 0.0, 0.49, 1436.0),
        (5, 1.0, 0.49, 2236.0),
        (6, 0.0, 0.64, 1436.0),
        (7, 0.0, 0.66, 1436.0),
        (8, 1.0, 0.58, 2236.0),
    ];
    for (num, score, expected_score, performance) in expected {
        let p = t.player(num).unwrap();
        assert_eq!(p.score(), score);
        assert_abs_diff_eq!(p.expected_score(), expected_score, epsilon = 0.01);
        assert_abs_diff_eq!(p.performance().unwrap(), performance, epsilon = 0.5);
        if num == 1 {
            assert_abs_diff_eq!(p.new_rating().unwrap(), 1836.0, epsilon = 0.5);
            assert_eq!(p.bonus(), Some(71.0));
        } else {
            assert_eq!(p.new_rating(), p.rating());
        }
    }
}

#[test]
fn bonus_alongside_a_provisional_player() {
    let mut t = tournament(
        "Drogheda Congress Sec 5 2007",
        vec![
            (1, rated(1081, 24)),
            (2, rated(1026, 32)),
            (3, provisional(603, 5)),
            (4, rated(568, 40)),
            (5, rated(719, 40)),
            (6, rated(1032, 40)),
        ],
        &[
            (1, 1, 6, "D"),
            (1, 2, 5, "W"),
            (1, 3, 4, "W"),
            (2, 6, 4, "W"),
            (2, 5, 3, "W"),
            (2, 1, 2, "D"),
            (3, 6, 2, "D"),
            (3, 3, 1, "L"),
            (3, 4, 5, "L"),
            (4, 5, 6, "W"),
            (4, 1, 4, "W"),
            (4, 2, 3, "W"),
            (5, 3, 6, "L"),
            (5, 4, 2, "L"),
            (5, 5, 1, "D"),
        ],
    );
    t.rate().unwrap();

    let expected = [
        (1, 3.5, 3.84, 977.0, 1073.0, 0.0),
        (2, 4.0, 3.51, 1068.0, 1042.0, 0.0),
        (3, 1.0, 1.05, 636.0, 636.0, 0.0),
        (4, 0.0, 0.78, 520.0, 537.0, 0.0),
        (5, 3.5, 1.74, 1026.0, 835.0, 45.0),
        (6, 3.0, 3.54, 907.0, 1010.0, 0.0),
    ];
    for (num, score, expected_score, performance, new_rating, bonus) in expected {
        let p = t.player(num).unwrap();
        assert_eq!(p.score(), score);
        assert_eq!(p.bonus().unwrap_or(0.0), bonus);
        assert_abs_diff_eq!(p.performance().unwrap(), performance, epsilon = 0.5);
        assert_abs_diff_eq!(p.expected_score(), expected_score, epsilon = 0.01);
        assert_abs_diff_eq!(p.new_rating().unwrap(), new_rating, epsilon = 0.5);
    }
}

fn drogheda_section_h() -> Tournament {
    tournament(
        "Drogheda Club Championship, 2009, Section H",
        vec![
            (1, provisional(1079, 17)),
            (2, rated(659, 40)),
            (3, rated(731, 40)),
            (4, rated(728, 40)),
            (5, provisional(894, 5)),
            (6, unrated()),
            (7, rated(654, 24)),
        ],
        &[
            (1, 2, 7, "W"),
            (1, 3, 6, "W"),
            (1, 4, 5, "L"),
            (2, 6, 4, "L"),
            (2, 7, 3, "L"),
            (2, 1, 2, "L"),
            (3, 3, 1, "L"),
            (4, 2, 3, "D"),
            (5, 4, 2, "L"),
            (5, 5, 1, "L"),
            (6, 1, 6, "W"),
            (7, 5, 3, "L"),
            (7, 6, 2, "W"),
            (7, 7, 1, "L"),
        ],
    )
}

const SECTION_H: [(i32, f64, f64, f64, f64, f64); 7] = [
    (1, 4.0, 4.28, 1052.0, 1052.0, 0.0),
    (2, 3.5, 1.93, 920.0, 757.0, 35.0),
    (3, 3.5, 2.29, 932.0, 798.0, 18.0),
    (4, 1.0, 1.52, 588.0, 707.0, 0.0),
    (5, 1.0, 1.40, 828.0, 828.0, 0.0),
    (6, 1.0, 0.91, 627.0, 627.0, 0.0),
    (7, 0.0, 0.78, 460.0, 635.0, 0.0),
];

fn assert_section_h(t: &Tournament) {
    for (num, score, expected_score, performance, new_rating, bonus) in SECTION_H {
        let p = t.player(num).unwrap();
        let tolerance = if num == 2 { 0.6 } else { 0.5 };
        assert_eq!(p.score(), score);
        assert_eq!(p.bonus().unwrap_or(0.0), bonus);
        assert_abs_diff_eq!(p.performance().unwrap(), performance, epsilon = tolerance);
        assert_abs_diff_eq!(p.expected_score(), expected_score, epsilon = 0.01);
        assert_abs_diff_eq!(p.new_rating().unwrap(), new_rating, epsilon = 0.5);
    }
}

#[test]
fn two_bonuses_in_a_mixed_field() {
    let mut t = drogheda_section_h();
    t.rate().unwrap();
    assert_section_h(&t);
}

#[test]
fn rating_twice_gives_the_same_answer() {
    let mut t = drogheda_section_h();
    t.rate().unwrap();
    let first: Vec<_> = t
        .players()
        .map(|p| (p.new_rating(), p.performance(), p.bonus(), p.expected_score()))
        .collect();

    t.rate().unwrap();
    assert_section_h(&t);
    let second: Vec<_> = t
        .players()
        .map(|p| (p.new_rating(), p.performance(), p.bonus(), p.expected_score()))
        .collect();
    assert_eq!(first, second);
}

#[test]
fn turning_bonuses_off_changes_the_outcome() {
    let mut t = drogheda_section_h();
    t.set_no_bonuses(true);
    t.rate().unwrap();

    assert_eq!(t.iterations2(), 0);
    for p in t.players() {
        assert_eq!(p.bonus().unwrap_or(0.0), 0.0);
    }
    for (num, with_bonus) in [(2, 757.0), (3, 798.0)] {
        let rating = t.player(num).unwrap().new_rating().unwrap();
        assert!((rating - with_bonus).abs() > 1.0);
    }
}

#[test]
fn unrateable_players_are_left_alone() {
    let mut t = tournament(
        "Unrateable Test 3",
        vec![
            (1, rated(2174, 16)),
            (2, rated(1182, 24)),
            (3, provisional(717, 13)),
            (4, provisional(678, 13)),
            (5, unrated()),
            (6, unrated()),
        ],
        &[
            (1, 1, 2, "W"),
            (1, 4, 5, "W"),
            (2, 1, 3, "W"),
            (2, 4, 6, "W"),
            (3, 2, 3, "W"),
            (3, 5, 6, "W"),
        ],
    );
    t.rate().unwrap();

    for (num, expected_score, new_rating) in [(1, 2.00, 2174.0), (2, 0.91, 1184.0), (3, 0.10, 792.0)] {
        let p = t.player(num).unwrap();
        assert_abs_diff_eq!(p.expected_score(), expected_score, epsilon = 0.01);
        assert_abs_diff_eq!(p.new_rating().unwrap(), new_rating, epsilon = 0.5);
    }
    for num in [4, 5, 6] {
        let p = t.player(num).unwrap();
        assert_eq!(p.expected_score(), 0.0);
        assert_eq!(p.performance(), None);
        assert_eq!(p.new_rating(), None);
    }
}
