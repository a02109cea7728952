use gravbeat_play::{Judgment, ScoreManager};

fn perfects(n: u32) -> ScoreManager {
    let mut score = ScoreManager::new();
    for _ in 0..n {
        score.add_judgment(Judgment::Perfect, 100, 100);
    }
    score
}

#[test]
fn test_multiplier_applies_to_combo_before_hit() {
    // Hits 1..=100 are at x1, 101..=200 at x2, 201..=300 at x3, then x4.
    assert_eq!(perfects(99).score(), 9_900);
    assert_eq!(perfects(100).score(), 10_000);
    assert_eq!(perfects(101).score(), 10_200);
    assert_eq!(perfects(199).score(), 10_000 + 99 * 200);
    assert_eq!(perfects(200).score(), 30_000);
    assert_eq!(perfects(299).score(), 30_000 + 99 * 300);
    assert_eq!(perfects(300).score(), 60_000);
    assert_eq!(perfects(301).score(), 60_400);
}

#[test]
fn test_miss_drops_multiplier() {
    let mut score = perfects(150);
    let before = score.score();
    assert_eq!(score.add_judgment(Judgment::Miss, 0, 100), 0);
    assert_eq!(score.score(), before);
    assert_eq!(score.combo(), 0);
    assert_eq!(score.max_combo(), 150);
    assert_eq!(score.miss_count(), 1);
    assert_eq!(score.add_judgment(Judgment::Good, 50, 100), 50);
}

#[test]
fn test_combo_never_decreases_without_miss() {
    let mut score = ScoreManager::new();
    let mut last = 0;
    for judgment in [Judgment::Perfect, Judgment::Good, Judgment::Late, Judgment::Early] {
        score.add_judgment(judgment, 25, 100);
        assert!(score.combo() > last);
        last = score.combo();
    }
    assert_eq!(score.hit_count(), 4);
}
