mod run;

pub use run::BusflowConfiguration;
