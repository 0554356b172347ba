pub mod parameters;
pub mod random_ift;

pub use parameters::RandomAlgoParameters;
pub use random_ift::StabchainBuilderRandom;
