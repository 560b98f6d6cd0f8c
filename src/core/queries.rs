use neo4rs::{query, Query};

/// Weighted multi-hop ranking for an email-identified requester.
///
/// Direct matches are technologies the requester is interested in or
/// likes that the candidate knows; indirect matches extend one hop
/// through CHILD_OF/USES/IS. Candidates are ranked by 2*direct + indirect.
const WEIGHTED_MULTI_HOP: &str = "
    MATCH (u:User)-[:INTERESTED_IN|LIKES]->(t:Tech)<-[:KNOWS]-(u2:User)
    WHERE u.email = $email
    OPTIONAL MATCH (t)-[:CHILD_OF|USES|IS]->(t2:Tech)<-[:KNOWS]-(u2)
    WITH u2,
        count(DISTINCT t) AS matching_tech,
        count(DISTINCT t2) AS related_tech
    ORDER BY (2 * matching_tech) + related_tech DESC
    RETURN u2.email AS email,
        u2.diffbotUri AS diffbotUri,
        u2.firstName AS firstName,
        matching_tech AS directMatches,
        related_tech AS indirectMatches
    LIMIT $max_recommendations";

/// Shared-technology ranking for an email-identified requester,
/// optionally restricted to candidates attending the same tenant.
const TENANT_SCOPED: &str = "
    MATCH (u:User)-[:INTERESTED_IN|LIKES]->(t:Tech)<-[:KNOWS]-(u2:User)
    WHERE u.email = $email
      AND ($tenant IS NULL OR EXISTS {
          MATCH (u2)-[:ATTENDED]->(:Tenant {id: $tenant})
      })
    WITH u2, count(DISTINCT t) AS matching_tech
    ORDER BY matching_tech DESC
    RETURN DISTINCT u2.email AS email,
        u2.diffbotUri AS diffbotUri,
        u2.firstName AS firstName
    LIMIT $max_recommendations";

/// Same-tenant reachability for a diffbotUri-identified requester.
///
/// Candidates attend the same tenant and are reachable through a bounded
/// path on each side of a shared Tech/Role/Employer node; tenant nodes
/// may not appear on the path. Ranked by distinct shared nodes.
const EXTERNAL_IDENTITY: &str = "
    MATCH (u:User)-[:ATTENDED]->(tn:Tenant)<-[:ATTENDED]-(u2:User)
    WHERE u.diffbotUri = $diffbot_uri
      AND u2.diffbotUri <> $diffbot_uri
      AND ($tenant IS NULL OR tn.id = $tenant)
    MATCH path = (u)-[*1..3]-(common)-[*1..3]-(u2)
    WHERE (common:Tech OR common:Role OR common:Employer)
      AND none(n IN nodes(path) WHERE n:Tenant)
    WITH u2, count(DISTINCT common) AS shared_nodes
    ORDER BY shared_nodes DESC
    RETURN DISTINCT u2.email AS email,
        u2.diffbotUri AS diffbotUri,
        u2.firstName AS firstName
    LIMIT $max_recommendations";

pub fn weighted_multi_hop(email: &str, max_recommendations: u32) -> Query {
    query(WEIGHTED_MULTI_HOP)
        .param("email", email)
        .param("max_recommendations", max_recommendations as i64)
}

pub fn tenant_scoped(email: &str, tenant: Option<&str>, max_recommendations: u32) -> Query {
    query(TENANT_SCOPED)
        .param("email", email)
        .param("tenant", tenant.map(str::to_owned))
        .param("max_recommendations", max_recommendations as i64)
}

pub fn external_identity(
    diffbot_uri: &str,
    tenant: Option<&str>,
    max_recommendations: u32,
) -> Query {
    query(EXTERNAL_IDENTITY)
        .param("diffbot_uri", diffbot_uri)
        .param("tenant", tenant.map(str::to_owned))
        .param("max_recommendations", max_recommendations as i64)
}
