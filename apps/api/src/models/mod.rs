pub mod career_path;
pub mod learner;
