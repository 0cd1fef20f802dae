use quiz_core::model::QuestionRecord;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Pick one clue uniformly from the question's clue list.
pub fn pick_clue<R: Rng + ?Sized>(question: &QuestionRecord, rng: &mut R) -> Option<String> {
    question
        .clue_list()
        .choose(rng)
        .map(|clue| (*clue).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn clue_comes_from_the_list() {
        let question = QuestionRecord::new("Bhupali", "S R G P D S'", "Sa Re Ga;Ma Pa").unwrap();
        for seed in 0..32 {
            let clue = pick_clue(&question, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert!(clue == "Sa Re Ga" || clue == "Ma Pa", "unexpected clue {clue}");
        }
    }

    #[test]
    fn separators_only_yield_no_clue() {
        let question = QuestionRecord::new("Bhupali", "S R G P D S'", ";;").unwrap();
        assert_eq!(pick_clue(&question, &mut StdRng::seed_from_u64(0)), None);
    }
}
