//! Request disposition planning.
//!
//! The disposition of a blood request (approve, complete, reject, reset) is
//! computed here as a pure function over the current request, its assigned
//! unit and the operator's choices. The resulting [`DispositionPlan`] is then
//! applied atomically by the requests repository; no I/O happens in this
//! module.
//!
//! Rules:
//! - APPROVED requires a candidate unit, which gets RESERVED and linked.
//! - COMPLETED requires a unit (candidate or already assigned), which gets
//!   DISTRIBUTED and linked.
//! - PENDING / REJECTED release any assigned unit back to AVAILABLE and
//!   clear the link.
//! - Swapping units on an approved request releases the old unit first.
//! - COMPLETED is terminal; only an idempotent re-complete is accepted.

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{RequestStatus, UnitStatus},
        inventory::BloodUnit,
        request::{BloodRequest, DispositionPlan, UnitAction},
    },
};

/// Compute the state changes for a disposition, or reject it.
///
/// `assigned` must be the unit currently linked to the request (if any);
/// `candidate` is the operator-selected unit from the form (if any). On
/// error nothing is to be mutated.
pub fn plan_disposition(
    request: &BloodRequest,
    assigned: Option<&BloodUnit>,
    target: RequestStatus,
    candidate: Option<&BloodUnit>,
) -> AppResult<DispositionPlan> {
    if request.status == RequestStatus::Completed {
        // Terminal state: accept only a re-submit of the same completion.
        let same_unit = match candidate {
            None => true,
            Some(unit) => Some(unit.id) == request.assigned_unit_id,
        };
        if target == RequestStatus::Completed && same_unit {
            return Ok(DispositionPlan {
                new_status: RequestStatus::Completed,
                assigned_unit_id: request.assigned_unit_id,
                actions: Vec::new(),
            });
        }
        return Err(AppError::BusinessRule(
            "A completed request cannot be reopened".to_string(),
        ));
    }

    match target {
        RequestStatus::Approved => {
            let unit = candidate.ok_or_else(|| {
                AppError::validation(
                    "unit_id",
                    "You must select a blood unit to approve this request",
                )
            })?;

            // Re-approving with the unit already reserved for this request
            // is a no-op on the inventory side.
            if Some(unit.id) == request.assigned_unit_id {
                return Ok(DispositionPlan {
                    new_status: RequestStatus::Approved,
                    assigned_unit_id: Some(unit.id),
                    actions: Vec::new(),
                });
            }

            check_candidate(request, unit)?;

            let mut actions = Vec::new();
            if let Some(old) = assigned {
                actions.push(release(old));
            }
            actions.push(UnitAction {
                unit_id: unit.id,
                from: UnitStatus::Available,
                to: UnitStatus::Reserved,
            });

            Ok(DispositionPlan {
                new_status: RequestStatus::Approved,
                assigned_unit_id: Some(unit.id),
                actions,
            })
        }

        RequestStatus::Completed => {
            // A fresh candidate takes precedence over the assigned unit.
            if let Some(unit) = candidate {
                if assigned.map_or(true, |a| a.id != unit.id) {
                    check_candidate(request, unit)?;

                    let mut actions = Vec::new();
                    if let Some(old) = assigned {
                        actions.push(release(old));
                    }
                    actions.push(UnitAction {
                        unit_id: unit.id,
                        from: UnitStatus::Available,
                        to: UnitStatus::Distributed,
                    });

                    return Ok(DispositionPlan {
                        new_status: RequestStatus::Completed,
                        assigned_unit_id: Some(unit.id),
                        actions,
                    });
                }
            }

            let unit = assigned.ok_or_else(|| {
                AppError::validation(
                    "unit_id",
                    "No blood unit assigned; select one to complete distribution",
                )
            })?;

            Ok(DispositionPlan {
                new_status: RequestStatus::Completed,
                assigned_unit_id: Some(unit.id),
                actions: vec![UnitAction {
                    unit_id: unit.id,
                    from: unit.status,
                    to: UnitStatus::Distributed,
                }],
            })
        }

        RequestStatus::Pending | RequestStatus::Rejected => {
            let mut actions = Vec::new();
            if let Some(old) = assigned {
                // Skip the write when the unit is somehow already free.
                if old.status != UnitStatus::Available {
                    actions.push(release(old));
                }
            }

            Ok(DispositionPlan {
                new_status: target,
                assigned_unit_id: None,
                actions,
            })
        }
    }
}

/// A newly selected candidate must be AVAILABLE and match the patient's
/// blood group.
fn check_candidate(request: &BloodRequest, unit: &BloodUnit) -> AppResult<()> {
    if unit.blood_group != request.patient_blood_group {
        return Err(AppError::validation(
            "unit_id",
            &format!(
                "Blood unit {} is group {}, request needs {}",
                unit.serial_number, unit.blood_group, request.patient_blood_group
            ),
        ));
    }
    if unit.status != UnitStatus::Available {
        return Err(AppError::BusinessRule(format!(
            "Blood unit {} is not available (status {})",
            unit.serial_number, unit.status
        )));
    }
    Ok(())
}

fn release(unit: &BloodUnit) -> UnitAction {
    UnitAction {
        unit_id: unit.id,
        from: unit.status,
        to: UnitStatus::Available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{BloodGroup, Component, Urgency};
    use chrono::{Duration, Utc};

    fn unit(id: i32, group: BloodGroup, status: UnitStatus) -> BloodUnit {
        BloodUnit {
            id,
            serial_number: format!("SN-{:04}", id),
            donor_id: None,
            campaign_id: None,
            blood_group: group,
            status,
            date_collected: Utc::now(),
            expiry_date: Utc::now() + Duration::days(35),
            processed_by: None,
        }
    }

    fn request(status: RequestStatus, assigned_unit_id: Option<i32>) -> BloodRequest {
        BloodRequest {
            id: 1,
            requestor_id: Some(10),
            assigned_unit_id,
            patient_name: "Juan dela Cruz".to_string(),
            patient_blood_group: BloodGroup::OPos,
            hospital_name: "General Hospital".to_string(),
            hospital_address: "Manila".to_string(),
            physician_name: "Dr. Reyes".to_string(),
            physician_license: "PRC-12345".to_string(),
            component: Component::Whole,
            quantity: 1,
            urgency: Urgency::Urgent,
            reason: "surgery".to_string(),
            status,
            request_date: Utc::now(),
            processed_by: None,
        }
    }

    #[test]
    fn approve_without_candidate_is_rejected() {
        let req = request(RequestStatus::Pending, None);
        let err = plan_disposition(&req, None, RequestStatus::Approved, None).unwrap_err();
        match err {
            AppError::Validation { field, .. } => assert_eq!(field, "unit_id"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn approve_reserves_matching_available_unit() {
        let req = request(RequestStatus::Pending, None);
        let u1 = unit(1, BloodGroup::OPos, UnitStatus::Available);

        let plan = plan_disposition(&req, None, RequestStatus::Approved, Some(&u1)).unwrap();

        assert_eq!(plan.new_status, RequestStatus::Approved);
        assert_eq!(plan.assigned_unit_id, Some(1));
        assert_eq!(
            plan.actions,
            vec![UnitAction {
                unit_id: 1,
                from: UnitStatus::Available,
                to: UnitStatus::Reserved,
            }]
        );
    }

    #[test]
    fn approve_rejects_blood_group_mismatch() {
        let req = request(RequestStatus::Pending, None);
        let u1 = unit(1, BloodGroup::ANeg, UnitStatus::Available);

        let err = plan_disposition(&req, None, RequestStatus::Approved, Some(&u1)).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn approve_rejects_unavailable_unit() {
        let req = request(RequestStatus::Pending, None);
        let u1 = unit(1, BloodGroup::OPos, UnitStatus::Reserved);

        let err = plan_disposition(&req, None, RequestStatus::Approved, Some(&u1)).unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[test]
    fn reapprove_with_different_unit_releases_the_old_one() {
        let req = request(RequestStatus::Approved, Some(1));
        let old = unit(1, BloodGroup::OPos, UnitStatus::Reserved);
        let new = unit(2, BloodGroup::OPos, UnitStatus::Available);

        let plan =
            plan_disposition(&req, Some(&old), RequestStatus::Approved, Some(&new)).unwrap();

        assert_eq!(plan.assigned_unit_id, Some(2));
        assert_eq!(
            plan.actions,
            vec![
                UnitAction {
                    unit_id: 1,
                    from: UnitStatus::Reserved,
                    to: UnitStatus::Available,
                },
                UnitAction {
                    unit_id: 2,
                    from: UnitStatus::Available,
                    to: UnitStatus::Reserved,
                },
            ]
        );
    }

    #[test]
    fn reapprove_with_same_unit_is_a_noop_on_inventory() {
        let req = request(RequestStatus::Approved, Some(1));
        let u1 = unit(1, BloodGroup::OPos, UnitStatus::Reserved);

        let plan = plan_disposition(&req, Some(&u1), RequestStatus::Approved, Some(&u1)).unwrap();

        assert_eq!(plan.new_status, RequestStatus::Approved);
        assert_eq!(plan.assigned_unit_id, Some(1));
        assert!(plan.actions.is_empty());
    }

    #[test]
    fn complete_distributes_the_assigned_unit() {
        let req = request(RequestStatus::Approved, Some(1));
        let u1 = unit(1, BloodGroup::OPos, UnitStatus::Reserved);

        let plan = plan_disposition(&req, Some(&u1), RequestStatus::Completed, None).unwrap();

        assert_eq!(plan.new_status, RequestStatus::Completed);
        assert_eq!(plan.assigned_unit_id, Some(1));
        assert_eq!(
            plan.actions,
            vec![UnitAction {
                unit_id: 1,
                from: UnitStatus::Reserved,
                to: UnitStatus::Distributed,
            }]
        );
    }

    #[test]
    fn complete_with_fresh_candidate_from_pending() {
        let req = request(RequestStatus::Pending, None);
        let u1 = unit(1, BloodGroup::OPos, UnitStatus::Available);

        let plan = plan_disposition(&req, None, RequestStatus::Completed, Some(&u1)).unwrap();

        assert_eq!(plan.assigned_unit_id, Some(1));
        assert_eq!(
            plan.actions,
            vec![UnitAction {
                unit_id: 1,
                from: UnitStatus::Available,
                to: UnitStatus::Distributed,
            }]
        );
    }

    #[test]
    fn complete_without_any_unit_is_rejected() {
        let req = request(RequestStatus::Pending, None);
        let err = plan_disposition(&req, None, RequestStatus::Completed, None).unwrap_err();
        match err {
            AppError::Validation { field, .. } => assert_eq!(field, "unit_id"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn complete_with_swap_releases_old_and_distributes_new() {
        let req = request(RequestStatus::Approved, Some(1));
        let old = unit(1, BloodGroup::OPos, UnitStatus::Reserved);
        let new = unit(2, BloodGroup::OPos, UnitStatus::Available);

        let plan =
            plan_disposition(&req, Some(&old), RequestStatus::Completed, Some(&new)).unwrap();

        assert_eq!(plan.assigned_unit_id, Some(2));
        assert_eq!(
            plan.actions,
            vec![
                UnitAction {
                    unit_id: 1,
                    from: UnitStatus::Reserved,
                    to: UnitStatus::Available,
                },
                UnitAction {
                    unit_id: 2,
                    from: UnitStatus::Available,
                    to: UnitStatus::Distributed,
                },
            ]
        );
    }

    #[test]
    fn reject_releases_the_assigned_unit() {
        let req = request(RequestStatus::Approved, Some(1));
        let u1 = unit(1, BloodGroup::OPos, UnitStatus::Reserved);

        let plan = plan_disposition(&req, Some(&u1), RequestStatus::Rejected, None).unwrap();

        assert_eq!(plan.new_status, RequestStatus::Rejected);
        assert_eq!(plan.assigned_unit_id, None);
        assert_eq!(
            plan.actions,
            vec![UnitAction {
                unit_id: 1,
                from: UnitStatus::Reserved,
                to: UnitStatus::Available,
            }]
        );
    }

    #[test]
    fn reset_to_pending_releases_and_clears() {
        let req = request(RequestStatus::Approved, Some(1));
        let u1 = unit(1, BloodGroup::OPos, UnitStatus::Reserved);

        let plan = plan_disposition(&req, Some(&u1), RequestStatus::Pending, None).unwrap();

        assert_eq!(plan.new_status, RequestStatus::Pending);
        assert_eq!(plan.assigned_unit_id, None);
        assert_eq!(plan.actions.len(), 1);
    }

    #[test]
    fn reject_without_assigned_unit_touches_nothing() {
        let req = request(RequestStatus::Pending, None);
        let plan = plan_disposition(&req, None, RequestStatus::Rejected, None).unwrap();
        assert!(plan.actions.is_empty());
        assert_eq!(plan.assigned_unit_id, None);
    }

    #[test]
    fn recomplete_same_unit_is_idempotent() {
        let req = request(RequestStatus::Completed, Some(1));
        let u1 = unit(1, BloodGroup::OPos, UnitStatus::Distributed);

        let plan = plan_disposition(&req, Some(&u1), RequestStatus::Completed, Some(&u1)).unwrap();

        assert_eq!(plan.new_status, RequestStatus::Completed);
        assert_eq!(plan.assigned_unit_id, Some(1));
        assert!(plan.actions.is_empty());
    }

    #[test]
    fn completed_is_terminal() {
        let req = request(RequestStatus::Completed, Some(1));
        let u1 = unit(1, BloodGroup::OPos, UnitStatus::Distributed);

        for target in [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ] {
            let err = plan_disposition(&req, Some(&u1), target, None).unwrap_err();
            assert!(matches!(err, AppError::BusinessRule(_)), "target {:?}", target);
        }
    }

    // Full O+ scenario: approve with U1, complete, then attempt to reject.
    #[test]
    fn o_positive_walkthrough() {
        let mut req = request(RequestStatus::Pending, None);
        let mut u1 = unit(1, BloodGroup::OPos, UnitStatus::Available);

        let plan = plan_disposition(&req, None, RequestStatus::Approved, Some(&u1)).unwrap();
        req.status = plan.new_status;
        req.assigned_unit_id = plan.assigned_unit_id;
        u1.status = plan.actions.last().unwrap().to;
        assert_eq!(req.status, RequestStatus::Approved);
        assert_eq!(req.assigned_unit_id, Some(1));
        assert_eq!(u1.status, UnitStatus::Reserved);

        let plan = plan_disposition(&req, Some(&u1), RequestStatus::Completed, None).unwrap();
        req.status = plan.new_status;
        req.assigned_unit_id = plan.assigned_unit_id;
        u1.status = plan.actions.last().unwrap().to;
        assert_eq!(req.status, RequestStatus::Completed);
        assert_eq!(u1.status, UnitStatus::Distributed);

        let err = plan_disposition(&req, Some(&u1), RequestStatus::Rejected, None).unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }
}
