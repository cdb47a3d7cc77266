//! CLI tool for deploying and operating the composite plus vault.

use plus_contracts::composite::CompositePlus;
use plus_contracts::single::SinglePlus;
use odra::prelude::Address;
use odra::host::HostEnv;
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};

/// Deploys the composite plus contract.
/// The deploying account becomes governance.
pub struct CompositePlusDeployScript;

impl DeployScript for CompositePlusDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use plus_contracts::composite::composite_plus::CompositePlusInitArgs;

        let _composite = CompositePlus::load_or_deploy(
            &env,
            CompositePlusInitArgs {
                name: String::from("Composite Plus"),
                symbol: String::from("CP+"),
            },
            container,
            500_000_000_000 // Gas limit for composite deployment
        )?;

        Ok(())
    }
}

/// Scenario to add a single plus token to the basket.
pub struct AddTokenScenario;

impl Scenario for AddTokenScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "token",
                "Address of the plus token to support",
                NamedCLType::Key,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut composite = container.contract_ref::<CompositePlus>(env)?;
        let token = args.get_single::<Address>("token")?;

        env.set_gas(100_000_000_000);
        composite.try_add_token(token)?;

        println!("Token added to the basket");
        Ok(())
    }
}

impl ScenarioMetadata for AddTokenScenario {
    const NAME: &'static str = "add-token";
    const DESCRIPTION: &'static str = "Adds a plus token to the composite basket";
}

/// Scenario to re-price the composite from its live holdings.
pub struct RebaseScenario;

impl Scenario for RebaseScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        _args: Args
    ) -> Result<(), Error> {
        let mut composite = container.contract_ref::<CompositePlus>(env)?;

        env.set_gas(200_000_000_000);
        composite.try_rebase()?;

        println!("Index after rebase: {}", composite.index());
        println!("Total supply: {}", composite.total_supply());
        Ok(())
    }
}

impl ScenarioMetadata for RebaseScenario {
    const NAME: &'static str = "rebase";
    const DESCRIPTION: &'static str = "Rebases the composite to its current holdings";
}

/// Scenario to update the redeem fee, in basis points.
pub struct SetRedeemFeeScenario;

impl Scenario for SetRedeemFeeScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "fee",
                "Redeem fee in basis points",
                NamedCLType::U32,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut composite = container.contract_ref::<CompositePlus>(env)?;
        let fee = args.get_single::<u32>("fee")?;

        env.set_gas(50_000_000_000);
        composite.try_set_redeem_fee(fee)?;

        println!("Redeem fee set to {} bps", fee);
        Ok(())
    }
}

impl ScenarioMetadata for SetRedeemFeeScenario {
    const NAME: &'static str = "set-redeem-fee";
    const DESCRIPTION: &'static str = "Sets the composite redeem fee in basis points";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the plus vault contracts")
        // Deploy scripts
        .deploy(CompositePlusDeployScript)
        // Contract references
        .contract::<CompositePlus>()
        .contract::<SinglePlus>()
        // Scenarios
        .scenario(AddTokenScenario)
        .scenario(RebaseScenario)
        .scenario(SetRedeemFeeScenario)
        .build()
        .run();
}
