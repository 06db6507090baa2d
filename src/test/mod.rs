mod broker_pipeline;
mod path_cache;
mod registry;
mod scenario_spec;
mod sdn_routing;
mod sim_time;
mod workflow_log;
