pub mod sampler;

pub use sampler::SineSampler;
