// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::storage;
use crate::storage::retrieval_limits;
use cosmwasm_std::Deps;
use cw_utils::maybe_addr;
use feegrant_contract_common::{
    AllowanceResponse, AllowancesByGranterPagedResponse, AllowancesPagedResponse,
    FeegrantContractError,
};

pub fn query_allowance(
    deps: Deps<'_>,
    granter: String,
    grantee: String,
) -> Result<AllowanceResponse, FeegrantContractError> {
    let granter = deps.api.addr_validate(&granter)?;
    let grantee = deps.api.addr_validate(&grantee)?;

    let grant = storage::may_load_grant(deps.storage, &granter, &grantee)?
        .ok_or(FeegrantContractError::NoAllowance { granter, grantee })?;

    Ok(AllowanceResponse { grant })
}

pub fn query_allowances_paged(
    deps: Deps<'_>,
    grantee: String,
    start_after: Option<String>,
    limit: Option<u32>,
) -> Result<AllowancesPagedResponse, FeegrantContractError> {
    let grantee = deps.api.addr_validate(&grantee)?;
    let limit = limit
        .unwrap_or(retrieval_limits::ALLOWANCES_DEFAULT_LIMIT)
        .min(retrieval_limits::ALLOWANCES_MAX_LIMIT) as usize;
    let start_after = maybe_addr(deps.api, start_after)?;

    let allowances =
        storage::grants_by_grantee_paged(deps.storage, &grantee, start_after.as_ref(), limit)?;
    let start_next_after = allowances.last().map(|grant| grant.granter.to_string());

    Ok(AllowancesPagedResponse {
        allowances,
        start_next_after,
    })
}

pub fn query_allowances_by_granter_paged(
    deps: Deps<'_>,
    granter: String,
    start_after: Option<String>,
    limit: Option<u32>,
) -> Result<AllowancesByGranterPagedResponse, FeegrantContractError> {
    let granter = deps.api.addr_validate(&granter)?;
    let limit = limit
        .unwrap_or(retrieval_limits::ALLOWANCES_DEFAULT_LIMIT)
        .min(retrieval_limits::ALLOWANCES_MAX_LIMIT) as usize;
    let start_after = maybe_addr(deps.api, start_after)?;

    let allowances =
        storage::grants_by_granter_paged(deps.storage, &granter, start_after.as_ref(), limit)?;
    let start_next_after = allowances.last().map(|grant| grant.grantee.to_string());

    Ok(AllowancesByGranterPagedResponse {
        allowances,
        start_next_after,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{basic_allowance, generate_sorted_addresses, init_contract};
    use crate::transactions::try_grant_allowance;
    use cosmwasm_std::testing::{message_info, mock_env};

    #[test]
    fn exact_allowance_lookup() -> anyhow::Result<()> {
        let mut deps = init_contract();
        let granter = deps.api.addr_make("granter");
        let grantee = deps.api.addr_make("grantee");

        let res = query_allowance(deps.as_ref(), granter.to_string(), grantee.to_string());
        assert_eq!(
            res,
            Err(FeegrantContractError::NoAllowance {
                granter: granter.clone(),
                grantee: grantee.clone(),
            })
        );

        try_grant_allowance(
            deps.as_mut(),
            mock_env(),
            message_info(&granter, &[]),
            grantee.to_string(),
            basic_allowance(555),
        )?;

        let res = query_allowance(deps.as_ref(), granter.to_string(), grantee.to_string())?;
        assert_eq!(res.grant.granter, granter);
        assert_eq!(res.grant.grantee, grantee);
        assert_eq!(res.grant.allowance, basic_allowance(555));
        Ok(())
    }

    #[test]
    fn paged_allowances_for_a_grantee() -> anyhow::Result<()> {
        let mut deps = init_contract();
        let grantee = deps.api.addr_make("grantee");

        let granters = generate_sorted_addresses(&deps.api, 5);
        for granter in &granters {
            try_grant_allowance(
                deps.as_mut(),
                mock_env(),
                message_info(granter, &[]),
                grantee.to_string(),
                basic_allowance(555),
            )?;
        }

        let page = query_allowances_paged(deps.as_ref(), grantee.to_string(), None, Some(3))?;
        assert_eq!(page.allowances.len(), 3);
        assert_eq!(page.start_next_after, Some(granters[2].to_string()));

        let page = query_allowances_paged(
            deps.as_ref(),
            grantee.to_string(),
            page.start_next_after,
            Some(3),
        )?;
        assert_eq!(page.allowances.len(), 2);
        assert_eq!(page.start_next_after, Some(granters[4].to_string()));

        // the unpaged default picks everything up at once
        let page = query_allowances_paged(deps.as_ref(), grantee.to_string(), None, None)?;
        assert_eq!(page.allowances.len(), 5);
        Ok(())
    }

    #[test]
    fn paged_allowances_by_granter() -> anyhow::Result<()> {
        let mut deps = init_contract();
        let granter = deps.api.addr_make("granter");
        let other_granter = deps.api.addr_make("other-granter");

        let mut grantees = (0..4)
            .map(|i| deps.api.addr_make(&format!("grantee{i}")))
            .collect::<Vec<_>>();
        grantees.sort();
        for grantee in &grantees {
            try_grant_allowance(
                deps.as_mut(),
                mock_env(),
                message_info(&granter, &[]),
                grantee.to_string(),
                basic_allowance(555),
            )?;
        }
        try_grant_allowance(
            deps.as_mut(),
            mock_env(),
            message_info(&other_granter, &[]),
            grantees[0].to_string(),
            basic_allowance(43),
        )?;

        let page =
            query_allowances_by_granter_paged(deps.as_ref(), granter.to_string(), None, Some(3))?;
        assert_eq!(page.allowances.len(), 3);
        assert!(page.allowances.iter().all(|grant| grant.granter == granter));
        assert_eq!(page.start_next_after, Some(grantees[2].to_string()));

        let page = query_allowances_by_granter_paged(
            deps.as_ref(),
            granter.to_string(),
            page.start_next_after,
            Some(3),
        )?;
        assert_eq!(page.allowances.len(), 1);
        assert_eq!(page.allowances[0].grantee, grantees[3]);
        Ok(())
    }

    #[test]
    fn page_sizes_are_capped() -> anyhow::Result<()> {
        let deps = init_contract();
        let grantee = deps.api.addr_make("grantee");

        // an oversized request doesn't error, it is simply clamped
        let res = query_allowances_paged(
            deps.as_ref(),
            grantee.to_string(),
            None,
            Some(u32::MAX),
        )?;
        assert!(res.allowances.is_empty());
        Ok(())
    }
}
