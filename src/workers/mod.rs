pub mod premium_sweeper;

pub use premium_sweeper::PremiumSweeperWorker;
