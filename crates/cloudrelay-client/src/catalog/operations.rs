use super::{MAX_PER_PAGE, OperationSpec, ParamKind, ParamSpec};

const ZONE_ID: ParamSpec = ParamSpec::path("zone_id", "Zone identifier");
const ACCOUNT_ID: ParamSpec = ParamSpec::path("account_id", "Account identifier");
const PAGE: ParamSpec = ParamSpec::query(
    "page",
    ParamKind::Integer { min: 1, max: 100_000 },
    "Page number of paginated results",
);
const PER_PAGE: ParamSpec = ParamSpec::query(
    "per_page",
    ParamKind::Integer { min: 1, max: MAX_PER_PAGE },
    "Number of results per page",
);
const NAME: ParamSpec = ParamSpec::query("name", ParamKind::Text, "Filter by name");
const ORDER_DIRECTION: ParamSpec = ParamSpec::query(
    "direction",
    ParamKind::Enum(&["asc", "desc"]),
    "Sort direction",
);
const SINCE: ParamSpec = ParamSpec::query(
    "since",
    ParamKind::Text,
    "Start of the time range (RFC 3339)",
);
const BEFORE: ParamSpec = ParamSpec::query(
    "before",
    ParamKind::Text,
    "End of the time range (RFC 3339)",
);

const RULESET_PHASES: &[&str] = &[
    "ddos_l4",
    "ddos_l7",
    "http_config_settings",
    "http_custom_errors",
    "http_log_custom_fields",
    "http_ratelimit",
    "http_request_cache_settings",
    "http_request_dynamic_redirect",
    "http_request_firewall_custom",
    "http_request_firewall_managed",
    "http_request_late_transform",
    "http_request_origin",
    "http_request_redirect",
    "http_request_sanitize",
    "http_request_sbfm",
    "http_request_transform",
    "http_response_compression",
    "http_response_firewall_managed",
    "http_response_headers_transform",
    "magic_transit",
    "magic_transit_ids_managed",
    "magic_transit_managed",
];

const LOGPUSH_DATASETS: &[&str] = &[
    "access_requests",
    "audit_logs",
    "casb_findings",
    "device_posture_results",
    "dns_firewall_logs",
    "dns_logs",
    "firewall_events",
    "gateway_dns",
    "gateway_http",
    "gateway_network",
    "http_requests",
    "magic_ids_detections",
    "nel_reports",
    "network_analytics_logs",
    "page_shield_events",
    "sinkhole_http_logs",
    "spectrum_events",
    "ssh_logs",
    "workers_trace_events",
    "zaraz_events",
    "zero_trust_network_sessions",
];

pub static OPERATIONS: &[OperationSpec] = &[
    // accounts
    OperationSpec::get(
        "list_accounts",
        "List the accounts the API token can access",
        "/accounts",
        &[
            NAME,
            ORDER_DIRECTION,
            PAGE,
            PER_PAGE,
        ],
    ),
    OperationSpec::get(
        "get_account",
        "Get details of an account",
        "/accounts/{account_id}",
        &[ACCOUNT_ID],
    ),
    OperationSpec::get(
        "list_account_members",
        "List the members of an account",
        "/accounts/{account_id}/members",
        &[
            ACCOUNT_ID,
            ParamSpec::query(
                "status",
                ParamKind::Enum(&["accepted", "pending", "rejected"]),
                "Filter by membership status",
            ),
            ORDER_DIRECTION,
            PAGE,
            PER_PAGE,
        ],
    ),
    OperationSpec::get(
        "get_account_member",
        "Get a single account member",
        "/accounts/{account_id}/members/{member_id}",
        &[ACCOUNT_ID, ParamSpec::path("member_id", "Member identifier")],
    ),
    OperationSpec::get(
        "list_account_roles",
        "List the roles available in an account",
        "/accounts/{account_id}/roles",
        &[ACCOUNT_ID, PAGE, PER_PAGE],
    ),
    OperationSpec::get(
        "list_account_tokens",
        "List account-owned API tokens (metadata only)",
        "/accounts/{account_id}/tokens",
        &[ACCOUNT_ID, ORDER_DIRECTION, PAGE, PER_PAGE],
    ),
    OperationSpec::get(
        "list_account_audit_logs",
        "List audit log entries for an account",
        "/accounts/{account_id}/audit_logs",
        &[
            ACCOUNT_ID,
            ParamSpec::query("actor_email", ParamKind::Email, "Filter by actor email")
                .wire("actor.email"),
            ParamSpec::query("actor_ip", ParamKind::Text, "Filter by actor IP address")
                .wire("actor.ip"),
            ParamSpec::query("zone_name", ParamKind::Text, "Filter by zone name")
                .wire("zone.name"),
            SINCE,
            BEFORE,
            ORDER_DIRECTION,
            PAGE,
            PER_PAGE,
        ],
    ),
    OperationSpec::get(
        "get_account_subscriptions",
        "List the subscriptions of an account",
        "/accounts/{account_id}/subscriptions",
        &[ACCOUNT_ID],
    ),
    // user
    OperationSpec::get(
        "get_user",
        "Get the user that owns the API token",
        "/user",
        &[],
    ),
    OperationSpec::get(
        "verify_user_token",
        "Verify the API token and report its status",
        "/user/tokens/verify",
        &[],
    ),
    OperationSpec::get(
        "list_user_memberships",
        "List the account memberships of the current user",
        "/memberships",
        &[
            ParamSpec::query("account_name", ParamKind::Text, "Filter by account name")
                .wire("account.name"),
            ParamSpec::query(
                "status",
                ParamKind::Enum(&["accepted", "pending", "rejected"]),
                "Filter by membership status",
            ),
            ORDER_DIRECTION,
            PAGE,
            PER_PAGE,
        ],
    ),
    OperationSpec::get(
        "list_user_organizations",
        "List organizations the current user belongs to",
        "/user/organizations",
        &[NAME, PAGE, PER_PAGE],
    ),
    // zones
    OperationSpec::get(
        "list_zones",
        "List zones, optionally filtered by name, status or account",
        "/zones",
        &[
            NAME,
            ParamSpec::query(
                "status",
                ParamKind::Enum(&[
                    "initializing",
                    "pending",
                    "active",
                    "moved",
                ]),
                "Filter by zone status",
            ),
            ParamSpec::query("account_id", ParamKind::Identifier, "Filter by account")
                .wire("account.id"),
            ParamSpec::query("account_name", ParamKind::Text, "Filter by account name")
                .wire("account.name"),
            ParamSpec::query(
                "order",
                ParamKind::Enum(&["name", "status", "account.id", "account.name"]),
                "Field to order by",
            ),
            ORDER_DIRECTION,
            PAGE,
            PER_PAGE,
        ],
    ),
    OperationSpec::get(
        "get_zone",
        "Get details of a zone",
        "/zones/{zone_id}",
        &[ZONE_ID],
    ),
    OperationSpec::get(
        "list_zone_settings",
        "List all settings of a zone",
        "/zones/{zone_id}/settings",
        &[ZONE_ID],
    ),
    OperationSpec::get(
        "get_zone_setting",
        "Get a single zone setting",
        "/zones/{zone_id}/settings/{setting_id}",
        &[ZONE_ID, ParamSpec::path("setting_id", "Setting name, e.g. ssl or min_tls_version")],
    ),
    OperationSpec::get(
        "list_zone_available_plans",
        "List plans available to a zone",
        "/zones/{zone_id}/available_plans",
        &[ZONE_ID],
    ),
    OperationSpec::get(
        "get_zone_subscription",
        "Get the subscription of a zone",
        "/zones/{zone_id}/subscription",
        &[ZONE_ID],
    ),
    OperationSpec::get(
        "get_zone_hold",
        "Get the hold status of a zone",
        "/zones/{zone_id}/hold",
        &[ZONE_ID],
    ),
    // DNS
    OperationSpec::get(
        "list_dns_records",
        "List DNS records of a zone",
        "/zones/{zone_id}/dns_records",
        &[
            ZONE_ID,
            ParamSpec::query(
                "type",
                ParamKind::Enum(&[
                    "A", "AAAA", "CAA", "CERT", "CNAME", "DNSKEY", "DS", "HTTPS", "LOC",
                    "MX", "NAPTR", "NS", "PTR", "SMIMEA", "SRV", "SSHFP", "SVCB", "TLSA",
                    "TXT", "URI",
                ]),
                "Filter by record type",
            ),
            NAME,
            ParamSpec::query("content", ParamKind::Text, "Filter by record content"),
            ParamSpec::query("proxied", ParamKind::Boolean, "Filter by proxy status"),
            ParamSpec::query(
                "match",
                ParamKind::Enum(&["any", "all"]),
                "Whether all or any filters must match",
            ),
            ParamSpec::query(
                "order",
                ParamKind::Enum(&["type", "name", "content", "ttl", "proxied"]),
                "Field to order by",
            ),
            ORDER_DIRECTION,
            PAGE,
            PER_PAGE,
        ],
    ),
    OperationSpec::get(
        "get_dns_record",
        "Get a single DNS record",
        "/zones/{zone_id}/dns_records/{dns_record_id}",
        &[ZONE_ID, ParamSpec::path("dns_record_id", "DNS record identifier")],
    ),
    OperationSpec::get(
        "export_dns_records",
        "Export the DNS records of a zone as a BIND zone file",
        "/zones/{zone_id}/dns_records/export",
        &[ZONE_ID],
    ),
    OperationSpec::get(
        "get_dnssec",
        "Get the DNSSEC status of a zone",
        "/zones/{zone_id}/dnssec",
        &[ZONE_ID],
    ),
    OperationSpec::get(
        "get_dns_settings",
        "Get the DNS settings of a zone",
        "/zones/{zone_id}/dns_settings",
        &[ZONE_ID],
    ),
    OperationSpec::get(
        "list_dns_firewall_clusters",
        "List DNS firewall clusters of an account",
        "/accounts/{account_id}/dns_firewall",
        &[ACCOUNT_ID, PAGE, PER_PAGE],
    ),
    // SSL/TLS
    OperationSpec::get(
        "get_ssl_verification",
        "Get SSL certificate verification status for a zone",
        "/zones/{zone_id}/ssl/verification",
        &[ZONE_ID],
    ),
    OperationSpec::get(
        "list_certificate_packs",
        "List certificate packs of a zone",
        "/zones/{zone_id}/ssl/certificate_packs",
        &[
            ZONE_ID,
            ParamSpec::query(
                "status",
                ParamKind::Enum(&["all"]),
                "Include all packs, not only active ones",
            ),
        ],
    ),
    OperationSpec::get(
        "get_certificate_pack",
        "Get a single certificate pack",
        "/zones/{zone_id}/ssl/certificate_packs/{certificate_pack_id}",
        &[
            ZONE_ID,
            ParamSpec::path("certificate_pack_id", "Certificate pack identifier"),
        ],
    ),
    OperationSpec::get(
        "get_universal_ssl_settings",
        "Get Universal SSL settings of a zone",
        "/zones/{zone_id}/ssl/universal/settings",
        &[ZONE_ID],
    ),
    OperationSpec::get(
        "list_custom_certificates",
        "List custom SSL certificates of a zone",
        "/zones/{zone_id}/custom_certificates",
        &[ZONE_ID, PAGE, PER_PAGE],
    ),
    OperationSpec::get(
        "list_origin_certificates",
        "List Origin CA certificates of a zone",
        "/certificates",
        &[
            ParamSpec::query("zone_id", ParamKind::Identifier, "Zone identifier").required(),
            PAGE,
            PER_PAGE,
        ],
    ),
    OperationSpec::get(
        "list_custom_hostnames",
        "List custom hostnames of a zone",
        "/zones/{zone_id}/custom_hostnames",
        &[
            ZONE_ID,
            ParamSpec::query("hostname", ParamKind::Text, "Filter by hostname"),
            ORDER_DIRECTION,
            PAGE,
            PER_PAGE,
        ],
    ),
    // rulesets and security
    OperationSpec::get(
        "list_zone_rulesets",
        "List rulesets of a zone",
        "/zones/{zone_id}/rulesets",
        &[ZONE_ID],
    ),
    OperationSpec::get(
        "get_zone_ruleset",
        "Get a zone ruleset and its rules",
        "/zones/{zone_id}/rulesets/{ruleset_id}",
        &[ZONE_ID, ParamSpec::path("ruleset_id", "Ruleset identifier")],
    ),
    OperationSpec::get(
        "get_zone_entrypoint_ruleset",
        "Get the entry point ruleset of a zone for a phase",
        "/zones/{zone_id}/rulesets/phases/{ruleset_phase}/entrypoint",
        &[
            ZONE_ID,
            ParamSpec::path("ruleset_phase", "Ruleset phase").kind(ParamKind::Enum(RULESET_PHASES)),
        ],
    ),
    OperationSpec::get(
        "list_account_rulesets",
        "List rulesets of an account",
        "/accounts/{account_id}/rulesets",
        &[ACCOUNT_ID],
    ),
    OperationSpec::get(
        "get_account_ruleset",
        "Get an account ruleset and its rules",
        "/accounts/{account_id}/rulesets/{ruleset_id}",
        &[ACCOUNT_ID, ParamSpec::path("ruleset_id", "Ruleset identifier")],
    ),
    OperationSpec::get(
        "list_firewall_access_rules",
        "List IP access rules of a zone",
        "/zones/{zone_id}/firewall/access_rules/rules",
        &[
            ZONE_ID,
            ParamSpec::query(
                "mode",
                ParamKind::Enum(&["block", "challenge", "whitelist", "js_challenge", "managed_challenge"]),
                "Filter by action",
            ),
            ParamSpec::query("notes", ParamKind::Text, "Filter by notes"),
            ORDER_DIRECTION,
            PAGE,
            PER_PAGE,
        ],
    ),
    OperationSpec::get(
        "list_waf_packages",
        "List WAF packages of a zone",
        "/zones/{zone_id}/firewall/waf/packages",
        &[ZONE_ID, PAGE, PER_PAGE],
    ),
    OperationSpec::get(
        "get_security_level",
        "Get the security level setting of a zone",
        "/zones/{zone_id}/settings/security_level",
        &[ZONE_ID],
    ),
    OperationSpec::get(
        "get_bot_management",
        "Get Bot Management configuration of a zone",
        "/zones/{zone_id}/bot_management",
        &[ZONE_ID],
    ),
    OperationSpec::get(
        "list_page_shield_scripts",
        "List scripts detected by Page Shield",
        "/zones/{zone_id}/page_shield/scripts",
        &[ZONE_ID, PAGE, PER_PAGE],
    ),
    // workers and storage
    OperationSpec::get(
        "list_workers",
        "List Worker scripts of an account",
        "/accounts/{account_id}/workers/scripts",
        &[ACCOUNT_ID],
    ),
    OperationSpec::get(
        "get_worker_settings",
        "Get settings of a Worker script",
        "/accounts/{account_id}/workers/scripts/{script_name}/settings",
        &[ACCOUNT_ID, ParamSpec::path("script_name", "Worker script name")],
    ),
    OperationSpec::get(
        "list_worker_deployments",
        "List deployments of a Worker script",
        "/accounts/{account_id}/workers/scripts/{script_name}/deployments",
        &[ACCOUNT_ID, ParamSpec::path("script_name", "Worker script name")],
    ),
    OperationSpec::get(
        "list_worker_routes",
        "List Worker routes of a zone",
        "/zones/{zone_id}/workers/routes",
        &[ZONE_ID],
    ),
    OperationSpec::get(
        "list_worker_domains",
        "List custom domains attached to Workers",
        "/accounts/{account_id}/workers/domains",
        &[
            ACCOUNT_ID,
            ParamSpec::query("hostname", ParamKind::Text, "Filter by hostname"),
            ParamSpec::query("service", ParamKind::Identifier, "Filter by Worker service"),
        ],
    ),
    OperationSpec::get(
        "list_kv_namespaces",
        "List Workers KV namespaces",
        "/accounts/{account_id}/storage/kv/namespaces",
        &[ACCOUNT_ID, ORDER_DIRECTION, PAGE, PER_PAGE],
    ),
    OperationSpec::get(
        "list_kv_keys",
        "List key names in a Workers KV namespace (values are not read)",
        "/accounts/{account_id}/storage/kv/namespaces/{namespace_id}/keys",
        &[
            ACCOUNT_ID,
            ParamSpec::path("namespace_id", "KV namespace identifier"),
            ParamSpec::query("prefix", ParamKind::Text, "Filter by key prefix"),
            ParamSpec::query("cursor", ParamKind::Text, "Pagination cursor"),
            ParamSpec::query(
                "limit",
                ParamKind::Integer { min: 10, max: MAX_PER_PAGE },
                "Maximum number of keys returned",
            ),
        ],
    ),
    OperationSpec::get(
        "list_d1_databases",
        "List D1 databases",
        "/accounts/{account_id}/d1/database",
        &[ACCOUNT_ID, NAME, PAGE, PER_PAGE],
    ),
    OperationSpec::get(
        "get_d1_database",
        "Get details of a D1 database",
        "/accounts/{account_id}/d1/database/{database_id}",
        &[ACCOUNT_ID, ParamSpec::path("database_id", "D1 database identifier")],
    ),
    OperationSpec::get(
        "list_queues",
        "List Queues of an account",
        "/accounts/{account_id}/queues",
        &[ACCOUNT_ID],
    ),
    OperationSpec::get(
        "list_durable_object_namespaces",
        "List Durable Object namespaces",
        "/accounts/{account_id}/workers/durable_objects/namespaces",
        &[ACCOUNT_ID, PAGE, PER_PAGE],
    ),
    OperationSpec::get(
        "list_r2_buckets",
        "List R2 buckets",
        "/accounts/{account_id}/r2/buckets",
        &[
            ACCOUNT_ID,
            ParamSpec::query("name_contains", ParamKind::Text, "Filter by bucket name"),
            ParamSpec::query("cursor", ParamKind::Text, "Pagination cursor"),
            ORDER_DIRECTION,
            PER_PAGE,
        ],
    ),
    OperationSpec::get(
        "get_r2_bucket",
        "Get details of an R2 bucket",
        "/accounts/{account_id}/r2/buckets/{bucket_name}",
        &[ACCOUNT_ID, ParamSpec::path("bucket_name", "R2 bucket name")],
    ),
    OperationSpec::get(
        "list_pages_projects",
        "List Pages projects",
        "/accounts/{account_id}/pages/projects",
        &[ACCOUNT_ID, PAGE, PER_PAGE],
    ),
    OperationSpec::get(
        "get_pages_project",
        "Get a Pages project",
        "/accounts/{account_id}/pages/projects/{project_name}",
        &[ACCOUNT_ID, ParamSpec::path("project_name", "Pages project name")],
    ),
    OperationSpec::get(
        "list_pages_deployments",
        "List deployments of a Pages project",
        "/accounts/{account_id}/pages/projects/{project_name}/deployments",
        &[
            ACCOUNT_ID,
            ParamSpec::path("project_name", "Pages project name"),
            ParamSpec::query(
                "env",
                ParamKind::Enum(&["production", "preview"]),
                "Filter by environment",
            ),
            PAGE,
            PER_PAGE,
        ],
    ),
    // networking
    OperationSpec::get(
        "list_load_balancers",
        "List load balancers of a zone",
        "/zones/{zone_id}/load_balancers",
        &[ZONE_ID],
    ),
    OperationSpec::get(
        "get_load_balancer",
        "Get a load balancer",
        "/zones/{zone_id}/load_balancers/{load_balancer_id}",
        &[ZONE_ID, ParamSpec::path("load_balancer_id", "Load balancer identifier")],
    ),
    OperationSpec::get(
        "list_load_balancer_pools",
        "List load balancer pools of an account",
        "/accounts/{account_id}/load_balancers/pools",
        &[
            ACCOUNT_ID,
            ParamSpec::query("monitor", ParamKind::Identifier, "Filter by monitor"),
        ],
    ),
    OperationSpec::get(
        "get_load_balancer_pool_health",
        "Get the health of a load balancer pool",
        "/accounts/{account_id}/load_balancers/pools/{pool_id}/health",
        &[ACCOUNT_ID, ParamSpec::path("pool_id", "Pool identifier")],
    ),
    OperationSpec::get(
        "list_load_balancer_monitors",
        "List load balancer monitors of an account",
        "/accounts/{account_id}/load_balancers/monitors",
        &[ACCOUNT_ID],
    ),
    OperationSpec::get(
        "list_tunnels",
        "List Cloudflare Tunnels of an account",
        "/accounts/{account_id}/cfd_tunnel",
        &[
            ACCOUNT_ID,
            NAME,
            ParamSpec::query("is_deleted", ParamKind::Boolean, "Include deleted tunnels"),
            ParamSpec::query(
                "status",
                ParamKind::Enum(&["inactive", "degraded", "healthy", "down"]),
                "Filter by tunnel status",
            ),
            PAGE,
            PER_PAGE,
        ],
    ),
    OperationSpec::get(
        "get_tunnel",
        "Get a Cloudflare Tunnel",
        "/accounts/{account_id}/cfd_tunnel/{tunnel_id}",
        &[ACCOUNT_ID, ParamSpec::path("tunnel_id", "Tunnel identifier")],
    ),
    OperationSpec::get(
        "list_tunnel_connections",
        "List active connections of a Cloudflare Tunnel",
        "/accounts/{account_id}/cfd_tunnel/{tunnel_id}/connections",
        &[ACCOUNT_ID, ParamSpec::path("tunnel_id", "Tunnel identifier")],
    ),
    OperationSpec::get(
        "list_spectrum_apps",
        "List Spectrum applications of a zone",
        "/zones/{zone_id}/spectrum/apps",
        &[ZONE_ID, ORDER_DIRECTION, PAGE, PER_PAGE],
    ),
    OperationSpec::get(
        "list_waiting_rooms",
        "List waiting rooms of a zone",
        "/zones/{zone_id}/waiting_rooms",
        &[ZONE_ID, PAGE, PER_PAGE],
    ),
    // zero trust
    OperationSpec::get(
        "list_access_applications",
        "List Access applications of an account",
        "/accounts/{account_id}/access/apps",
        &[ACCOUNT_ID, NAME, PAGE, PER_PAGE],
    ),
    OperationSpec::get(
        "get_access_application",
        "Get an Access application",
        "/accounts/{account_id}/access/apps/{app_id}",
        &[ACCOUNT_ID, ParamSpec::path("app_id", "Access application identifier")],
    ),
    OperationSpec::get(
        "list_access_policies",
        "List reusable Access policies",
        "/accounts/{account_id}/access/policies",
        &[ACCOUNT_ID, PAGE, PER_PAGE],
    ),
    OperationSpec::get(
        "list_access_groups",
        "List Access groups",
        "/accounts/{account_id}/access/groups",
        &[ACCOUNT_ID, NAME, PAGE, PER_PAGE],
    ),
    OperationSpec::get(
        "list_access_identity_providers",
        "List Access identity providers",
        "/accounts/{account_id}/access/identity_providers",
        &[ACCOUNT_ID, PAGE, PER_PAGE],
    ),
    OperationSpec::get(
        "list_zero_trust_devices",
        "List devices enrolled in Zero Trust",
        "/accounts/{account_id}/devices",
        &[ACCOUNT_ID],
    ),
    OperationSpec::get(
        "list_gateway_rules",
        "List Zero Trust Gateway rules",
        "/accounts/{account_id}/gateway/rules",
        &[ACCOUNT_ID],
    ),
    OperationSpec::get(
        "list_gateway_locations",
        "List Zero Trust Gateway locations",
        "/accounts/{account_id}/gateway/locations",
        &[ACCOUNT_ID],
    ),
    // logs and notifications
    OperationSpec::get(
        "list_zone_logpush_jobs",
        "List Logpush jobs of a zone",
        "/zones/{zone_id}/logpush/jobs",
        &[ZONE_ID],
    ),
    OperationSpec::get(
        "list_account_logpush_jobs",
        "List Logpush jobs of an account",
        "/accounts/{account_id}/logpush/jobs",
        &[ACCOUNT_ID],
    ),
    OperationSpec::get(
        "list_logpush_dataset_fields",
        "List the fields available in a Logpush dataset",
        "/zones/{zone_id}/logpush/datasets/{dataset_id}/fields",
        &[
            ZONE_ID,
            ParamSpec::path("dataset_id", "Logpush dataset").kind(ParamKind::Enum(LOGPUSH_DATASETS)),
        ],
    ),
    OperationSpec::get(
        "list_notification_policies",
        "List notification policies of an account",
        "/accounts/{account_id}/alerting/v3/policies",
        &[ACCOUNT_ID],
    ),
    OperationSpec::get(
        "list_notification_history",
        "List notifications sent for an account",
        "/accounts/{account_id}/alerting/v3/history",
        &[ACCOUNT_ID, SINCE, BEFORE, PAGE, PER_PAGE],
    ),
    OperationSpec::get(
        "list_available_alerts",
        "List alert types available to an account",
        "/accounts/{account_id}/alerting/v3/available_alerts",
        &[ACCOUNT_ID],
    ),
    OperationSpec::get(
        "list_healthchecks",
        "List health checks of a zone",
        "/zones/{zone_id}/healthchecks",
        &[ZONE_ID, PAGE, PER_PAGE],
    ),
    // performance
    OperationSpec::get(
        "get_cache_level",
        "Get the cache level setting of a zone",
        "/zones/{zone_id}/settings/cache_level",
        &[ZONE_ID],
    ),
    OperationSpec::get(
        "get_tiered_caching",
        "Get the Tiered Cache setting of a zone",
        "/zones/{zone_id}/argo/tiered_caching",
        &[ZONE_ID],
    ),
    OperationSpec::get(
        "get_argo_smart_routing",
        "Get the Argo Smart Routing setting of a zone",
        "/zones/{zone_id}/argo/smart_routing",
        &[ZONE_ID],
    ),
    OperationSpec::get(
        "list_page_rules",
        "List Page Rules of a zone",
        "/zones/{zone_id}/pagerules",
        &[
            ZONE_ID,
            ParamSpec::query(
                "status",
                ParamKind::Enum(&["active", "disabled"]),
                "Filter by rule status",
            ),
            ParamSpec::query(
                "order",
                ParamKind::Enum(&["status", "priority"]),
                "Field to order by",
            ),
            ORDER_DIRECTION,
        ],
    ),
    // email and domains
    OperationSpec::get(
        "get_email_routing_settings",
        "Get Email Routing settings of a zone",
        "/zones/{zone_id}/email/routing",
        &[ZONE_ID],
    ),
    OperationSpec::get(
        "list_email_routing_rules",
        "List Email Routing rules of a zone",
        "/zones/{zone_id}/email/routing/rules",
        &[
            ZONE_ID,
            ParamSpec::query("enabled", ParamKind::Boolean, "Filter by enabled state"),
            PAGE,
            PER_PAGE,
        ],
    ),
    OperationSpec::get(
        "list_email_routing_addresses",
        "List verified Email Routing destination addresses",
        "/accounts/{account_id}/email/routing/addresses",
        &[
            ACCOUNT_ID,
            ParamSpec::query("verified", ParamKind::Boolean, "Filter by verification state"),
            ORDER_DIRECTION,
            PAGE,
            PER_PAGE,
        ],
    ),
    OperationSpec::get(
        "list_registrar_domains",
        "List domains registered with the registrar",
        "/accounts/{account_id}/registrar/domains",
        &[ACCOUNT_ID],
    ),
    OperationSpec::get(
        "get_registrar_domain",
        "Get a registered domain",
        "/accounts/{account_id}/registrar/domains/{domain_name}",
        &[ACCOUNT_ID, ParamSpec::path("domain_name", "Domain name")],
    ),
    // media
    OperationSpec::get(
        "list_images",
        "List images stored in Cloudflare Images",
        "/accounts/{account_id}/images/v2",
        &[
            ACCOUNT_ID,
            ParamSpec::query("continuation_token", ParamKind::Text, "Pagination cursor"),
            PER_PAGE,
        ],
    ),
    OperationSpec::get(
        "get_images_stats",
        "Get Cloudflare Images usage statistics",
        "/accounts/{account_id}/images/v1/stats",
        &[ACCOUNT_ID],
    ),
    OperationSpec::get(
        "list_stream_videos",
        "List Stream videos",
        "/accounts/{account_id}/stream",
        &[
            ACCOUNT_ID,
            ParamSpec::query("search", ParamKind::Text, "Search by video name"),
            ParamSpec::query(
                "status",
                ParamKind::Enum(&[
                    "pendingupload",
                    "downloading",
                    "queued",
                    "inprogress",
                    "ready",
                    "error",
                ]),
                "Filter by processing status",
            ),
            SINCE,
            BEFORE,
        ],
    ),
];
