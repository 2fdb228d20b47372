/*!
Granular delegated admin privileges: the relationships a partner holds with
customer tenants, the role assignments within them and the long running
operations and requests that change them.
*/

use chrono::{DateTime, FixedOffset};
use msgraph_rust_abstractions::duration::IsoDuration;

use super::{Entity, Entityable};

graph_enum! {
    /// Lifecycle state of a [DelegatedAdminRelationship]
    pub enum DelegatedAdminRelationshipStatus {
        Activating = "activating",
        Active = "active",
        ApprovalPending = "approvalPending",
        Approved = "approved",
        Created = "created",
        Expired = "expired",
        Expiring = "expiring",
        Terminated = "terminated",
        Terminating = "terminating",
        TerminationRequested = "terminationRequested",
        UnknownFutureValue = "unknownFutureValue",
    }
}

graph_enum! {
    pub enum DelegatedAdminAccessAssignmentStatus {
        Pending = "pending",
        Active = "active",
        Deleting = "deleting",
        Deleted = "deleted",
        Error = "error",
        UnknownFutureValue = "unknownFutureValue",
    }
}

graph_enum! {
    pub enum DelegatedAdminAccessContainerType {
        SecurityGroup = "securityGroup",
        UnknownFutureValue = "unknownFutureValue",
    }
}

graph_enum! {
    pub enum DelegatedAdminRelationshipOperationType {
        DelegatedAdminAccessAssignmentUpdate = "delegatedAdminAccessAssignmentUpdate",
        UnknownFutureValue = "unknownFutureValue",
        DelegatedAdminRelationshipUpdate = "delegatedAdminRelationshipUpdate",
    }
}

graph_enum! {
    /// Progress of an asynchronous operation
    pub enum LongRunningOperationStatus {
        NotStarted = "notStarted",
        Running = "running",
        Succeeded = "succeeded",
        Failed = "failed",
        UnknownFutureValue = "unknownFutureValue",
    }
}

graph_enum! {
    pub enum DelegatedAdminRelationshipRequestAction {
        LockForApproval = "lockForApproval",
        Approve = "approve",
        Terminate = "terminate",
        UnknownFutureValue = "unknownFutureValue",
        Reject = "reject",
    }
}

graph_enum! {
    pub enum DelegatedAdminRelationshipRequestStatus {
        Created = "created",
        Pending = "pending",
        Succeeded = "succeeded",
        Failed = "failed",
        UnknownFutureValue = "unknownFutureValue",
    }
}

graph_model! {
    /// A relationship through which a partner administers a customer tenant
    pub struct DelegatedAdminRelationship: Entity {
        subtypes AnyDelegatedAdminRelationship {
            "#microsoft.graph.resellerDelegatedAdminRelationship" => ResellerDelegatedAdminRelationship,
        }
        properties {
            /// The access assignments associated with the relationship
            access_assignments: Vec<DelegatedAdminAccessAssignment> = "accessAssignments",
            access_details: DelegatedAdminAccessDetails = "accessDetails",
            /// When the relationship became active. Read-only.
            activated_date_time: DateTime<FixedOffset> = "activatedDateTime",
            /// Duration by which the relationship is automatically extended:
            /// `P0D`, `PT0S` or `P180D`
            auto_extend_duration: IsoDuration = "autoExtendDuration",
            /// When the relationship was created. Read-only.
            created_date_time: DateTime<FixedOffset> = "createdDateTime",
            customer: DelegatedAdminRelationshipCustomerParticipant = "customer",
            /// Unique across the relationships of the partner, at most 50
            /// characters
            display_name: String = "displayName",
            /// Between `P1D` and `P2Y` inclusive
            duration: IsoDuration = "duration",
            /// `activatedDateTime + duration`. Read-only.
            end_date_time: DateTime<FixedOffset> = "endDateTime",
            last_modified_date_time: DateTime<FixedOffset> = "lastModifiedDateTime",
            operations: Vec<DelegatedAdminRelationshipOperation> = "operations",
            requests: Vec<DelegatedAdminRelationshipRequest> = "requests",
            status: DelegatedAdminRelationshipStatus = "status",
        }
    }
}

graph_model! {
    /// A relationship established through an indirect reseller
    pub struct ResellerDelegatedAdminRelationship: DelegatedAdminRelationship, Entity {
        discriminator = "#microsoft.graph.resellerDelegatedAdminRelationship";
        properties {
            /// Tenant of the indirect provider partner
            indirect_provider_tenant_id: String = "indirectProviderTenantId",
            is_partner_consent_pending: bool = "isPartnerConsentPending",
        }
    }
}

graph_model! {
    /// Display name and tenant of the customer of a relationship
    pub struct DelegatedAdminRelationshipCustomerParticipant {
        properties {
            display_name: String = "displayName",
            odata_type: String = "@odata.type",
            tenant_id: String = "tenantId",
        }
    }
}

graph_model! {
    /// Roles granted by a relationship or an access assignment
    pub struct DelegatedAdminAccessDetails {
        properties {
            odata_type: String = "@odata.type",
            unified_roles: Vec<UnifiedRole> = "unifiedRoles",
        }
    }
}

graph_model! {
    pub struct UnifiedRole {
        properties {
            odata_type: String = "@odata.type",
            /// Identifier of the Microsoft Entra role definition
            role_definition_id: String = "roleDefinitionId",
        }
    }
}

graph_model! {
    /// Grants the roles of a relationship to a security group of the partner
    pub struct DelegatedAdminAccessAssignment: Entity {
        properties {
            access_container: DelegatedAdminAccessContainer = "accessContainer",
            access_details: DelegatedAdminAccessDetails = "accessDetails",
            created_date_time: DateTime<FixedOffset> = "createdDateTime",
            last_modified_date_time: DateTime<FixedOffset> = "lastModifiedDateTime",
            status: DelegatedAdminAccessAssignmentStatus = "status",
        }
    }
}

graph_model! {
    pub struct DelegatedAdminAccessContainer {
        properties {
            /// Identifier of the security group in the partner tenant
            access_container_id: String = "accessContainerId",
            access_container_type: DelegatedAdminAccessContainerType = "accessContainerType",
            odata_type: String = "@odata.type",
        }
    }
}

graph_model! {
    /// An asynchronous change applied to a relationship
    pub struct DelegatedAdminRelationshipOperation: Entity {
        properties {
            created_date_time: DateTime<FixedOffset> = "createdDateTime",
            /// Payload of the operation
            data: String = "data",
            last_modified_date_time: DateTime<FixedOffset> = "lastModifiedDateTime",
            operation_type: DelegatedAdminRelationshipOperationType = "operationType",
            status: LongRunningOperationStatus = "status",
        }
    }
}

graph_model! {
    /// A request to change the state of a relationship
    pub struct DelegatedAdminRelationshipRequest: Entity {
        properties {
            action: DelegatedAdminRelationshipRequestAction = "action",
            created_date_time: DateTime<FixedOffset> = "createdDateTime",
            last_modified_date_time: DateTime<FixedOffset> = "lastModifiedDateTime",
            status: DelegatedAdminRelationshipRequestStatus = "status",
        }
    }
}

#[cfg(test)]
mod tests {
    use msgraph_rust_abstractions::{
        config::{from_json, to_json},
        store::BackedModel,
    };
    use serde_json::json;

    use super::*;

    #[test]
    fn nested_models() {
        let relationship: DelegatedAdminRelationship = from_json(
            &json!({
                "id": "5d027261-d21f-4aa9-b7db-7fa1f56fb163-8777b240-c6f0-4469-9e98-a3205431b836",
                "displayName": "Contoso admins",
                "duration": "P730D",
                "customer": {"tenantId": "4ff6c1aa-2ae1-4e1a-a1a6-b7b1ff3cc4f5", "displayName": "Contoso"},
                "accessDetails": {"unifiedRoles": [
                    {"roleDefinitionId": "29232cdf-9323-42fd-ade2-1d097af3e4de"},
                    {"roleDefinitionId": "3a2c62db-5318-420d-8d74-23affee5d9d5"}
                ]},
                "operations": [{"id": "1", "operationType": "delegatedAdminRelationshipUpdate", "status": "running"}]
            })
            .to_string(),
        )
        .unwrap()
        .unwrap();

        let duration: IsoDuration = "P730D".parse().unwrap();
        assert_eq!(relationship.duration().unwrap(), Some(duration));
        let customer = relationship.customer().unwrap().unwrap();
        assert_eq!(customer.display_name().unwrap().as_deref(), Some("Contoso"));
        let roles = relationship
            .access_details()
            .unwrap()
            .unwrap()
            .unified_roles()
            .unwrap()
            .unwrap();
        assert_eq!(roles.len(), 2);
        let operations = relationship.operations().unwrap().unwrap();
        assert_eq!(
            operations[0].status().unwrap(),
            Some(LongRunningOperationStatus::Running)
        );
        assert_eq!(
            operations[0].operation_type().unwrap(),
            Some(DelegatedAdminRelationshipOperationType::DelegatedAdminRelationshipUpdate)
        );
    }

    #[test]
    fn reseller_inherits_relationship() {
        let mut reseller = ResellerDelegatedAdminRelationship::new();
        reseller.set_display_name(Some("Fabrikam".to_owned())).unwrap();
        reseller.set_is_partner_consent_pending(Some(true)).unwrap();
        assert_eq!(
            reseller.odata_type().unwrap().as_deref(),
            Some("#microsoft.graph.resellerDelegatedAdminRelationship")
        );
        let relationship: &dyn DelegatedAdminRelationshipable = &reseller;
        assert_eq!(relationship.display_name().unwrap().as_deref(), Some("Fabrikam"));

        let output: serde_json::Value =
            serde_json::from_str(&to_json(&reseller).unwrap()).unwrap();
        assert_eq!(
            output,
            json!({
                "@odata.type": "#microsoft.graph.resellerDelegatedAdminRelationship",
                "displayName": "Fabrikam",
                "isPartnerConsentPending": true
            })
        );
        assert!(reseller.backing_store().has_changed_values());
    }

    #[test]
    fn setting_none_writes_null() {
        let mut assignment = DelegatedAdminAccessAssignment::new();
        assignment
            .set_status(Some(DelegatedAdminAccessAssignmentStatus::Pending))
            .unwrap();
        assignment.set_status(None).unwrap();
        assert_eq!(assignment.status().unwrap(), None);
        assert_eq!(to_json(&assignment).unwrap(), "{}");
    }
}
