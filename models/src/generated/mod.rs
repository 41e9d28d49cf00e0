//! Generated views module
//!
// This file is auto-generated. Do not edit manually.

pub mod date_specification;
pub mod shop_scenario;
pub mod shop_file;
pub mod shop_case;
pub mod power_asset;
pub mod generator;
pub mod partial_bid_configuration;
pub mod shop_based_partial_bid_configuration;
pub mod price_area_afrr;
pub mod price_area_day_ahead;
pub mod price_area_information;
pub mod price_production;

pub use date_specification::{DateSpecification, DateSpecificationApi, DateSpecificationFilter, DateSpecificationList, DateSpecificationWrite, DateSpecificationWriteList, DATE_SPECIFICATION_VIEW, create_date_specification_filter, DateSpecificationField, DateSpecificationTextField};
pub use shop_scenario::{ShopScenario, ShopScenarioApi, ShopScenarioFilter, ShopScenarioList, ShopScenarioWrite, ShopScenarioWriteList, SHOP_SCENARIO_VIEW, create_shop_scenario_filter, ShopScenarioField, ShopScenarioTextField};
pub use shop_file::{ShopFile, ShopFileApi, ShopFileFilter, ShopFileList, ShopFileWrite, ShopFileWriteList, SHOP_FILE_VIEW, create_shop_file_filter, ShopFileField, ShopFileTextField};
pub use shop_case::{ShopCase, ShopCaseApi, ShopCaseFilter, ShopCaseList, ShopCaseWrite, ShopCaseWriteList, SHOP_CASE_VIEW, create_shop_case_filter, ShopCaseField};
pub use power_asset::{PowerAsset, PowerAssetApi, PowerAssetFilter, PowerAssetList, PowerAssetWrite, PowerAssetWriteList, POWER_ASSET_VIEW, create_power_asset_filter, PowerAssetField, PowerAssetTextField};
pub use generator::{Generator, GeneratorApi, GeneratorFilter, GeneratorList, GeneratorWrite, GeneratorWriteList, GENERATOR_VIEW, create_generator_filter, GeneratorField, GeneratorTextField};
pub use partial_bid_configuration::{PartialBidConfiguration, PartialBidConfigurationApi, PartialBidConfigurationFilter, PartialBidConfigurationList, PartialBidConfigurationWrite, PartialBidConfigurationWriteList, PARTIAL_BID_CONFIGURATION_VIEW, create_partial_bid_configuration_filter, PartialBidConfigurationField, PartialBidConfigurationTextField};
pub use shop_based_partial_bid_configuration::{ShopBasedPartialBidConfiguration, ShopBasedPartialBidConfigurationApi, ShopBasedPartialBidConfigurationFilter, ShopBasedPartialBidConfigurationList, ShopBasedPartialBidConfigurationWrite, ShopBasedPartialBidConfigurationWriteList, SHOP_BASED_PARTIAL_BID_CONFIGURATION_VIEW, create_shop_based_partial_bid_configuration_filter, ShopBasedPartialBidConfigurationField, ShopBasedPartialBidConfigurationTextField};
pub use price_area_afrr::{PriceAreaAFRR, PriceAreaAFRRApi, PriceAreaAFRRFilter, PriceAreaAFRRList, PriceAreaAFRRWrite, PriceAreaAFRRWriteList, PRICE_AREA_AFRR_VIEW, create_price_area_afrr_filter, PriceAreaAFRRField, PriceAreaAFRRTextField};
pub use price_area_day_ahead::{PriceAreaDayAhead, PriceAreaDayAheadApi, PriceAreaDayAheadFilter, PriceAreaDayAheadList, PriceAreaDayAheadWrite, PriceAreaDayAheadWriteList, PRICE_AREA_DAY_AHEAD_VIEW, create_price_area_day_ahead_filter, PriceAreaDayAheadField, PriceAreaDayAheadTextField};
pub use price_area_information::{PriceAreaInformation, PriceAreaInformationApi, PriceAreaInformationFilter, PriceAreaInformationList, PriceAreaInformationWrite, PriceAreaInformationWriteList, PRICE_AREA_INFORMATION_VIEW, create_price_area_information_filter, PriceAreaInformationField, PriceAreaInformationTextField};
pub use price_production::{PriceProduction, PriceProductionApi, PriceProductionFilter, PriceProductionList, PriceProductionWrite, PriceProductionWriteList, PRICE_PRODUCTION_VIEW, create_price_production_filter, PriceProductionField, PriceProductionTextField};
