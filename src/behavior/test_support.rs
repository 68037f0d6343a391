//! Small hand-built games shared by unit tests.
use crate::experiment::core::{
    game::Game,
    labels::Label,
    round::{PlayerOutcome, Round, World},
    treatment::PaymentMatrix,
};

/// One-player game `"p"` from `(signal, report)` pairs; rewards are 1.
pub(crate) fn game_from_pairs(pairs: &[(Label, Label)]) -> Game {
    let mut game = Game::new(["p"]).expect("one player");
    for (i, (signal, report)) in pairs.iter().enumerate() {
        let mut round = Round::new(i, World::new(0.5).expect("valid world"));
        round
            .record("p", PlayerOutcome::new(*signal, *report, 1.0, None))
            .expect("finite reward");
        game.push_round(round).expect("complete round");
    }
    game
}

/// Two-player game where `"a"` and `"b"` reference each other; each entry
/// holds `[(a_signal, a_report), (b_signal, b_report)]`. Rewards follow the
/// basic payment matrix.
pub(crate) fn reference_game(rounds: &[[(Label, Label); 2]]) -> Game {
    let matrix = PaymentMatrix::basic();
    let mut game = Game::new(["a", "b"]).expect("two players");
    for (i, [(sa, ra), (sb, rb)]) in rounds.iter().enumerate() {
        let mut round = Round::new(i, World::new(0.5).expect("valid world"));
        round
            .record("a", PlayerOutcome::new(*sa, *ra, matrix.payment(*ra, *rb), Some("b".into())))
            .expect("finite reward");
        round
            .record("b", PlayerOutcome::new(*sb, *rb, matrix.payment(*rb, *ra), Some("a".into())))
            .expect("finite reward");
        game.push_round(round).expect("complete round");
    }
    game
}
