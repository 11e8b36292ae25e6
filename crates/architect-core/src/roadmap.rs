//! Default project roadmap used to seed an empty tree and on reset.

use crate::tree::Node;

type Group = (&'static str, &'static [&'static str]);
type Section = (&'static str, &'static [Group]);

const ROADMAP: &[Section] = &[
    (
        "Hierarchy and Authentication",
        &[
            (
                "User Profiles",
                &[
                    "Super Admin",
                    "Manufacturer Admin",
                    "Manufacturer Manager",
                    "Manufacturer Attendant",
                    "Manufacturer Finance",
                    "Reseller (B2B2C)",
                    "End Customer",
                ],
            ),
            (
                "Dual Approval Workflow",
                &[
                    "Platform screening (documents)",
                    "Manufacturer-reseller link",
                    "Price visibility after approval",
                    "Automatic block after 120 days",
                ],
            ),
            (
                "Security and 2FA",
                &[
                    "JWT authentication + RBAC",
                    "TOTP (authenticator app)",
                    "Backup recovery codes",
                    "AES-256 encryption at rest",
                    "Rate limiting + audit logs",
                ],
            ),
        ],
    ),
    (
        "Microservice Architecture",
        &[
            (
                "Core Services",
                &[
                    "identity-svc (auth, 2FA, RBAC)",
                    "catalog-svc (products, stock)",
                    "order-svc (orders, cart)",
                    "payment-svc (PIX, split)",
                    "freight-svc (shipping, tax)",
                    "notification-svc (WhatsApp, email)",
                ],
            ),
            (
                "New Services",
                &[
                    "crm-svc (reseller customers)",
                    "credit-svc (store credit, collection)",
                    "reservation-svc (1h TTL)",
                    "warranty-svc (PDF with QR code)",
                    "approval-svc (workflow)",
                    "pos-sync-svc (smart POS)",
                    "calendar-svc (holidays)",
                ],
            ),
            (
                "Multi-Tenant Data",
                &[
                    "PostgreSQL tenant isolation",
                    "Redis cache and sessions",
                    "Audit log store",
                    "Object storage for images and PDFs",
                ],
            ),
        ],
    ),
    (
        "Catalog and Advanced Stock",
        &[
            (
                "Multi-Warehouse",
                &[
                    "Headquarters, branches and distribution centres",
                    "Consolidated reseller view",
                    "Consignment stock",
                    "Real-time balance sync",
                ],
            ),
            (
                "Reservation System",
                &[
                    "One-hour reservation",
                    "Automatic release after expiry",
                    "At most 5 locked SKUs per reseller",
                    "Manufacturer notification",
                ],
            ),
            (
                "Unified White Label",
                &[
                    "Minimum participation score",
                    "Multi-manufacturer catalog",
                    "Standard packaging",
                    "Cross-docking logistics",
                ],
            ),
        ],
    ),
    (
        "Sales and Finance",
        &[
            (
                "Store Credit",
                &[
                    "Credit limit per customer",
                    "Terms: 7, 15, 30 days",
                    "Single interest-free instalment",
                    "Automatic reminders (D-1, D-Day, D+3, D+7)",
                    "Block when limit is reached",
                ],
            ),
            (
                "Payments",
                &[
                    "PIX (QR code + copy/paste)",
                    "Credit card with split",
                    "Bank slip",
                    "Card terminals",
                ],
            ),
            (
                "Electronic Warranties",
                &[
                    "PDF certificate with QR code",
                    "Online validation",
                    "Rules per product type",
                    "Automatic email with attachment",
                ],
            ),
        ],
    ),
    (
        "CRM and Communication",
        &[
            (
                "Reseller CRM",
                &[
                    "End customer records",
                    "Purchase history",
                    "Tags (VIP, late, new)",
                    "CSV import",
                    "Private notes",
                ],
            ),
            (
                "Omnichannel Messaging",
                &[
                    "WhatsApp Business API",
                    "Transactional email",
                    "Push notifications",
                    "Automatic templates",
                ],
            ),
        ],
    ),
    (
        "Hardware and Innovation",
        &[
            (
                "Smart POS",
                &[
                    "10-inch HD screen",
                    "Built-in digital catalog",
                    "NFC/chip reader + 58mm printer",
                    "Dual stock (local/factory)",
                    "Offline-first sync",
                ],
            ),
            (
                "POS Sync Service",
                &[
                    "WebSocket channel",
                    "72h offline cache",
                    "Conflict reconciliation",
                    "GPS anti-fraud tracking",
                ],
            ),
        ],
    ),
    (
        "Marketing and Calendar",
        &[
            (
                "Promotional Calendar",
                &[
                    "Automatic national holidays",
                    "D-30 preparation alerts",
                    "Movable date calculation",
                    "Minimum stock suggestion",
                ],
            ),
            (
                "Key Dates",
                &[
                    "Mother's Day",
                    "Father's Day",
                    "Christmas",
                    "Black Friday",
                    "Consumer Day",
                    "Easter",
                ],
            ),
            (
                "Marketing Automation",
                &[
                    "Three post variations",
                    "Scheduling D-7, D-3, D-Day",
                    "Social hub integration",
                ],
            ),
        ],
    ),
    (
        "Roadmap and Delivery",
        &[
            (
                "Hierarchy and Approvals",
                &[
                    "approval-svc workflow",
                    "Granular RBAC per profile",
                    "Manufacturer-reseller link screen",
                    "120-day block job",
                ],
            ),
            (
                "CRM and Customers",
                &[
                    "Customer records service",
                    "Purchase history",
                    "Tagging and segmentation",
                    "CSV import",
                ],
            ),
            (
                "Store Credit and Warranties",
                &[
                    "credit-svc engine",
                    "Collection scheduler",
                    "warranty-svc PDF with QR",
                    "Online QR validation",
                ],
            ),
            (
                "Advanced Stock",
                &[
                    "Multi-warehouse records",
                    "Consolidated view",
                    "reservation-svc (1h TTL)",
                    "Automatic release",
                ],
            ),
            (
                "White Label",
                &[
                    "Quality score system",
                    "Unified multi-manufacturer catalog",
                    "Dynamic branding",
                    "Cross-docking logistics",
                ],
            ),
            (
                "Compliance Checklist",
                &[
                    "Mandatory 2FA for admins",
                    "Append-only audit logs",
                    "Privacy consent",
                    "Full tenant isolation",
                ],
            ),
        ],
    ),
    (
        "Social Media Hub",
        &[
            (
                "Core Integrations",
                &[
                    "WhatsApp Business gateway",
                    "Meta Business API (Instagram/Facebook)",
                    "OAuth2 social account linking",
                    "Publishing status webhooks",
                ],
            ),
            (
                "Manufacturer Module",
                &[
                    "Drag-and-drop post calendar",
                    "Content creator (image, copy, hashtags)",
                    "Direct publishing",
                    "Push schedule to resellers",
                    "Basic analytics",
                ],
            ),
            (
                "Reseller Module",
                &[
                    "Inbox of received posts",
                    "Approve or reject manufacturer posts",
                    "Own posts on a personal schedule",
                    "Consolidated calendar",
                    "Auto-post to reseller accounts",
                ],
            ),
            (
                "B2B2C Approval Flow",
                &[
                    "Status: pending, approved, scheduled",
                    "WhatsApp notice on new post",
                    "Editable templates",
                    "Bulk approval",
                ],
            ),
            (
                "Social Stack",
                &[
                    "social-svc microservice",
                    "Scheduling queue",
                    "Media cache",
                    "Media asset storage",
                ],
            ),
        ],
    ),
];

/// Build the default forest. Ids follow position (`"3.2.4"`); only the
/// first section starts expanded.
pub fn default_forest() -> Vec<Node> {
    ROADMAP
        .iter()
        .enumerate()
        .map(|(si, (section, groups))| {
            let section_id = (si + 1).to_string();
            let mut root = Node::new(section_id.clone(), *section);
            root.expanded = si == 0;
            root.children = groups
                .iter()
                .enumerate()
                .map(|(gi, (group, leaves))| {
                    let group_id = format!("{section_id}.{}", gi + 1);
                    let mut node = Node::new(group_id.clone(), *group);
                    node.children = leaves
                        .iter()
                        .enumerate()
                        .map(|(li, leaf)| Node::new(format!("{group_id}.{}", li + 1), *leaf))
                        .collect();
                    node
                })
                .collect();
            root
        })
        .collect()
}
