use super::{
    call_records::CallRecord, DelegatedAdminAccessAssignment, DelegatedAdminRelationship,
    DelegatedAdminRelationshipOperation, DelegatedAdminRelationshipRequest,
    OrganizationalBranding, OrganizationalBrandingLocalization, OrganizationalBrandingProperties,
    ResellerDelegatedAdminRelationship, WindowsDeviceMalwareState, WindowsProtectionState,
};

graph_model! {
    /// Base type of every addressable resource
    pub struct Entity {
        subtypes AnyEntity {
            "#microsoft.graph.callRecords.callRecord" => CallRecord,
            "#microsoft.graph.delegatedAdminAccessAssignment" => DelegatedAdminAccessAssignment,
            "#microsoft.graph.delegatedAdminRelationship" => DelegatedAdminRelationship,
            "#microsoft.graph.delegatedAdminRelationshipOperation" => DelegatedAdminRelationshipOperation,
            "#microsoft.graph.delegatedAdminRelationshipRequest" => DelegatedAdminRelationshipRequest,
            "#microsoft.graph.organizationalBranding" => OrganizationalBranding,
            "#microsoft.graph.organizationalBrandingLocalization" => OrganizationalBrandingLocalization,
            "#microsoft.graph.organizationalBrandingProperties" => OrganizationalBrandingProperties,
            "#microsoft.graph.resellerDelegatedAdminRelationship" => ResellerDelegatedAdminRelationship,
            "#microsoft.graph.windowsDeviceMalwareState" => WindowsDeviceMalwareState,
            "#microsoft.graph.windowsProtectionState" => WindowsProtectionState,
        }
        properties {
            /// The unique identifier for an entity. Read-only.
            id: String = "id",
            /// The OData type of the entity
            odata_type: String = "@odata.type",
        }
    }
}
