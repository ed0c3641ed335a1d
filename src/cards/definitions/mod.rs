//! Card definitions, one file per card.

mod aquifer_turbines;
mod artificial_photosynthesis;
mod business_contacts;
mod fish;
mod insulation;
mod io_mining_industries;
mod lagrange_observatory;
mod lunar_beam;
mod meat_industry;
mod power_supply_consortium;
mod saturn_systems;
mod tharsis_republic;

pub use aquifer_turbines::AquiferTurbines;
pub use artificial_photosynthesis::ArtificialPhotosynthesis;
pub use business_contacts::BusinessContacts;
pub use fish::Fish;
pub use insulation::Insulation;
pub use io_mining_industries::IoMiningIndustries;
pub use lagrange_observatory::LagrangeObservatory;
pub use lunar_beam::LunarBeam;
pub use meat_industry::MeatIndustry;
pub use power_supply_consortium::PowerSupplyConsortium;
pub use saturn_systems::SaturnSystems;
pub use tharsis_republic::TharsisRepublic;
