use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

/// A fast generator seeded from the thread rng.
pub fn get_rng() -> XorShiftRng {
    XorShiftRng::seed_from_u64(rand::random())
}

/// A generator with a fixed seed, for reproducible runs.
pub fn get_rng_deterministic() -> XorShiftRng {
    get_rng_seeded(0x00C0_FFEE)
}

pub fn get_rng_seeded(seed: u64) -> XorShiftRng {
    XorShiftRng::seed_from_u64(seed)
}

pub fn random_pick<'a, T, R: Rng>(choices: &'a [T], rng: &mut R) -> Option<&'a T> {
    choices.choose(rng)
}

pub fn random_choice<T, R>(choices: &[T], rng: &mut R) -> T
where
    T: Copy,
    R: Rng,
{
    *random_pick(choices, rng).expect("Attempted to pick a random choice on an empty slice.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_pick_expects_none_on_empty_slice() {
        let empty: [usize; 0] = [];

        assert!(random_pick(&empty, &mut get_rng_deterministic()).is_none());
    }

    #[test]
    fn random_choice_expects_member_of_choices() {
        let choices = [3, 5, 7];
        let mut rng = get_rng_deterministic();

        for _ in 0..20 {
            assert!(choices.contains(&random_choice(&choices, &mut rng)));
        }
    }

    #[test]
    fn get_rng_seeded_expects_same_sequence_for_same_seed() {
        let mut a = get_rng_seeded(7);
        let mut b = get_rng_seeded(7);

        let a_draws = (0..5).map(|_| a.gen::<u32>()).collect::<Vec<_>>();
        let b_draws = (0..5).map(|_| b.gen::<u32>()).collect::<Vec<_>>();

        assert_eq!(a_draws, b_draws);
    }

    #[test]
    #[should_panic]
    fn random_choice_explodes_on_empty_slice() {
        let empty: [usize; 0] = [];

        random_choice(&empty, &mut get_rng_deterministic());
    }
}
