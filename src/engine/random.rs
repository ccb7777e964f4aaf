use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

//source of uniform draws for the simulator
//implementations must return values in [0, 1)
pub trait RandomSource {
    fn next_uniform(&mut self) -> f64;

    //picks an index in 0..len, uniformly
    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        let idx = (self.next_uniform() * len as f64) as usize;
        idx.min(len - 1)
    }
}

//pseudorandom source backed by StdRng
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
    seed: Option<u64>,
}

impl SeededRandom {
    //reproducible source
    pub fn from_seed(seed: u64) -> Self {
        SeededRandom {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    //non-reproducible source seeded from the os
    pub fn from_entropy() -> Self {
        SeededRandom {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    //seeded when a seed is given, entropy otherwise
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => SeededRandom::from_seed(s),
            None => SeededRandom::from_entropy(),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

//replays a fixed list of uniforms, wrapping around at the end
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    position: usize,
}

impl SequenceRandom {
    //values are clamped into [0, 1)
    pub fn new(values: Vec<f64>) -> Self {
        let values = if values.is_empty() { vec![0.0] } else { values };
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();

        SequenceRandom {
            values,
            position: 0,
        }
    }

    //a source that always picks index 0
    pub fn first_index() -> Self {
        SequenceRandom::new(vec![0.0])
    }

    //builds uniforms that select the given indices from a series of length len
    pub fn from_indices(indices: &[usize], len: usize) -> Self {
        let len = len.max(1) as f64;
        let values = indices
            .iter()
            .map(|&i| (i as f64 + 0.5) / len)
            .collect();
        SequenceRandom::new(values)
    }

    //number of draws consumed so far
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl RandomSource for SequenceRandom {
    fn next_uniform(&mut self) -> f64 {
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}
